//! Local stand-in for the Figma REST API.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use f2h_lib::FigmaClient;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
    pub figma_token: Option<String>,
    pub body: Option<Value>,
}

/// Canned responses for the two endpoints.
#[derive(Debug, Clone)]
pub struct StubFigma {
    pub file_status: u16,
    pub file_body: Value,
    pub image_status: u16,
    pub image_body: Value,
    /// Hold the file response back this long before answering.
    pub file_delay: Option<Duration>,
}

impl Default for StubFigma {
    fn default() -> Self {
        Self {
            file_status: 200,
            file_body: sample_file(),
            image_status: 200,
            image_body: sample_images(),
            file_delay: None,
        }
    }
}

impl StubFigma {
    pub fn file_error(status: u16, message: &str) -> Self {
        Self {
            file_status: status,
            file_body: json!({ "status": status, "err": message }),
            ..Self::default()
        }
    }

    pub fn slow_file(delay: Duration) -> Self {
        Self {
            file_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn image_error(status: u16, message: &str) -> Self {
        Self {
            image_status: status,
            image_body: json!({ "status": status, "err": message }),
            ..Self::default()
        }
    }
}

#[derive(Clone)]
struct Shared {
    stub: Arc<StubFigma>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Shared {
    fn record(&self, method: &'static str, path: String, headers: &HeaderMap, body: Option<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path,
            authorization: header("authorization"),
            figma_token: header("x-figma-token"),
            body,
        });
    }
}

pub struct StubServer {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn image_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.path.starts_with("/v1/images/"))
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_stub(stub: StubFigma) -> StubServer {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let shared = Shared {
        stub: Arc::new(stub),
        calls: calls.clone(),
    };
    let app = Router::new()
        .route("/v1/files/:key", get(file_handler))
        .route("/v1/images/:key", post(images_handler))
        .with_state(shared);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    StubServer {
        base_url: format!("http://{addr}"),
        calls,
        handle,
    }
}

/// Client that talks to the stub directly, whatever proxy the environment sets.
pub fn local_client(base_url: &str, timeout: Duration) -> FigmaClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .expect("http client");
    FigmaClient::with_http_client(base_url, http).expect("client")
}

async fn file_handler(
    State(shared): State<Shared>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Response {
    shared.record("GET", format!("/v1/files/{key}"), &headers, None);
    if let Some(delay) = shared.stub.file_delay {
        tokio::time::sleep(delay).await;
    }
    reply(shared.stub.file_status, &shared.stub.file_body)
}

async fn images_handler(
    State(shared): State<Shared>,
    Path(key): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    shared.record("POST", format!("/v1/images/{key}"), &headers, Some(body));
    reply(shared.stub.image_status, &shared.stub.image_body)
}

fn reply(status: u16, body: &Value) -> Response {
    let status = StatusCode::from_u16(status).expect("valid status");
    if status == StatusCode::TOO_MANY_REQUESTS {
        return (status, [("retry-after", "7")], Json(body.clone())).into_response();
    }
    (status, Json(body.clone())).into_response()
}

/// One page with two frames; the first holds a text node.
pub fn sample_file() -> Value {
    json!({
        "name": "Landing Page",
        "lastModified": "2024-05-01T12:00:00Z",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [{
                "id": "0:1",
                "name": "Page 1",
                "type": "CANVAS",
                "children": [
                    {
                        "id": "1:1",
                        "name": "Hero",
                        "type": "FRAME",
                        "absoluteBoundingBox": {"x": 0, "y": 0, "width": 1440, "height": 900},
                        "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1, "a": 1}}],
                        "children": [{
                            "id": "2:1",
                            "name": "Title",
                            "type": "TEXT",
                            "characters": "Hello & welcome",
                            "absoluteBoundingBox": {"x": 100, "y": 80, "width": 600, "height": 64},
                            "style": {"fontFamily": "Inter", "fontSize": 48, "fontWeight": 700},
                            "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0, "a": 1}}]
                        }]
                    },
                    {
                        "id": "1:2",
                        "name": "Footer",
                        "type": "FRAME",
                        "absoluteBoundingBox": {"x": 0, "y": 1000, "width": 1440, "height": 200},
                        "fills": [{"type": "SOLID", "color": {"r": 0.2, "g": 0.2, "b": 0.2, "a": 1}}]
                    }
                ]
            }]
        }
    })
}

/// First frame rendered, second one unavailable.
pub fn sample_images() -> Value {
    json!({
        "err": null,
        "images": {
            "1:1": "https://figma-alpha-api.s3.us-west-2.amazonaws.com/images/hero.png",
            "1:2": null
        }
    })
}
