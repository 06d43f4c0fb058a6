//! HTTP surface: the browser UI plus the embed and export JSON endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, ExportErrorMode};
use crate::design_ref::{parse_design_url, resolve_file_key};
use crate::embed::{embed_url, render_embed};
use crate::export::{export_design, ExportRequest};
use crate::figma::api_types::ImageExportOptions;
use crate::figma::{map_figma_error, FigmaAuth, FigmaClient};
use crate::output::{EmbedResponse, ErrorResponse, ExportResponse, EXPORT_FAILED};
use crate::ui::INDEX_PAGE;
use crate::{F2hError, Result};

const INVALID_FIGMA_URL: &str = "Invalid Figma URL";

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<Inner>,
}

struct Inner {
    figma: FigmaClient,
    clock: Arc<dyn Clock>,
    export_errors: ExportErrorMode,
    image_options: ImageExportOptions,
}

impl ServerState {
    pub fn new(
        figma: FigmaClient,
        clock: Arc<dyn Clock>,
        export_errors: ExportErrorMode,
        image_options: ImageExportOptions,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                figma,
                clock,
                export_errors,
                image_options,
            }),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let figma =
            FigmaClient::with_base_url_and_timeout(&config.figma.api_base, config.figma.timeout)
                .map_err(map_figma_error)?;
        Ok(Self::new(
            figma,
            Arc::new(SystemClock),
            config.server.export_errors,
            config.image_options(),
        ))
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/figma", post(embed_handler))
        .route("/api/figma/export-real", post(export_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve until the listener fails or the process receives Ctrl-C.
pub async fn run_server(listener: TcpListener, state: ServerState) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("f2h listening on http://{addr}");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmbedPayload {
    #[serde(default)]
    figma_url: String,
}

async fn embed_handler(
    State(state): State<ServerState>,
    payload: std::result::Result<Json<EmbedPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_json(rejection),
    };

    let design = match parse_design_url(&payload.figma_url) {
        Ok(design) => design,
        Err(err) => {
            tracing::debug!(error = %err, "rejected embed request");
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::message(INVALID_FIGMA_URL),
            );
        }
    };

    let html = render_embed(&design, state.inner.clock.as_ref());
    tracing::info!(file_key = %design.file_key, "generated embed page");
    Json(EmbedResponse {
        success: true,
        html,
        embed_url: embed_url(&design),
        file_key: design.file_key,
    })
    .into_response()
}

/// Export request body. Not `Debug`: it carries the caller's token.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportPayload {
    #[serde(default)]
    file_key: String,
    #[serde(default)]
    node_ids: Option<Vec<String>>,
    #[serde(default)]
    figma_token: String,
}

async fn export_handler(
    State(state): State<ServerState>,
    payload: std::result::Result<Json<ExportPayload>, JsonRejection>,
) -> Response {
    let mode = state.inner.export_errors;
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) if mode == ExportErrorMode::Generic => {
            tracing::debug!(error = %rejection, "rejected export request");
            return export_failed();
        }
        Err(rejection) => return bad_json(rejection),
    };

    match run_export(&state, payload).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            tracing::warn!(kind = ?err.kind(), error = %err, "export failed");
            match mode {
                ExportErrorMode::Detailed => error_response(
                    err.status_code(),
                    ErrorResponse {
                        error: err.to_string(),
                        kind: Some(err.kind()),
                    },
                ),
                ExportErrorMode::Generic => export_failed(),
            }
        }
    }
}

async fn run_export(state: &ServerState, payload: ExportPayload) -> Result<ExportResponse> {
    let file_key = resolve_file_key(&payload.file_key)?;
    if payload.figma_token.trim().is_empty() {
        return Err(F2hError::invalid_request("figmaToken is required"));
    }
    let auth = FigmaAuth::Bearer(payload.figma_token);
    let request = ExportRequest::new(file_key, payload.node_ids.unwrap_or_default())
        .with_options(state.inner.image_options);

    let document = export_design(&state.inner.figma, &auth, &request).await?;
    tracing::info!(
        file_key = %request.file_key,
        images = document.images.len(),
        "exported design"
    );
    Ok(ExportResponse {
        success: true,
        html: document.html,
        images: document.images,
    })
}

fn bad_json(rejection: JsonRejection) -> Response {
    tracing::debug!(error = %rejection, "rejected request body");
    error_response(
        StatusCode::BAD_REQUEST,
        ErrorResponse {
            error: rejection.body_text(),
            kind: None,
        },
    )
}

fn export_failed() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::message(EXPORT_FAILED),
    )
}

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}
