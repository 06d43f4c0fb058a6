//! Figma API client for fetching file data and rendering node images.

use crate::F2hError;
use reqwest::{header::RETRY_AFTER, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::api_types::{
    FigmaFile, ImageExportOptions, ImageMap, ImageRenderRequest, ImageRenderResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://api.figma.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FigmaError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Figma API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
    #[error("Unexpected Figma response: {0}")]
    Decode(String),
    #[error("Figma could not render images: {0}")]
    Render(String),
    #[error("Invalid Figma API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

pub fn map_figma_error(e: FigmaError) -> F2hError {
    match e {
        FigmaError::Request(req_err) => F2hError::Network(req_err),
        FigmaError::Api { status, message } => match status {
            401 | 403 => F2hError::UpstreamAuth { status, message },
            404 => F2hError::UpstreamNotFound { message },
            _ => F2hError::upstream(Some(status), message),
        },
        FigmaError::RateLimited(secs) => F2hError::upstream(
            Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            format!("Rate limited, retry after {} seconds", secs),
        ),
        FigmaError::Decode(message) => F2hError::upstream(None, message),
        FigmaError::Render(message) => F2hError::upstream(None, message),
        FigmaError::InvalidBaseUrl(err) => {
            F2hError::Config(format!("Invalid Figma API base URL: {err}"))
        }
    }
}

/// Credential forwarded to Figma. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub enum FigmaAuth {
    /// Sent as `X-FIGMA-TOKEN`.
    PersonalAccessToken(String),
    /// Sent as `Authorization: Bearer`.
    Bearer(String),
}

impl fmt::Debug for FigmaAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FigmaAuth::PersonalAccessToken(_) => f.write_str("PersonalAccessToken(<redacted>)"),
            FigmaAuth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

impl FigmaAuth {
    pub fn from_env() -> Option<Self> {
        if let Ok(token) = std::env::var("FIGMA_TOKEN") {
            if !token.is_empty() {
                return Some(Self::PersonalAccessToken(token));
            }
        }

        if let Ok(token) = std::env::var("FIGMA_OAUTH_TOKEN") {
            if !token.is_empty() {
                return Some(Self::Bearer(token));
            }
        }

        None
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FigmaAuth::PersonalAccessToken(token) | FigmaAuth::Bearer(token) => {
                token.trim().is_empty()
            }
        }
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            FigmaAuth::PersonalAccessToken(token) => builder.header("X-FIGMA-TOKEN", token),
            FigmaAuth::Bearer(token) => builder.bearer_auth(token),
        }
    }
}

/// Shared HTTP client. Credentials are supplied per call.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: Client,
    base_url: Url,
}

impl FigmaClient {
    pub fn new() -> Result<Self, FigmaError> {
        Self::with_base_url_and_timeout(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url_and_timeout(
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self, FigmaError> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_http_client(base_url, http)
    }

    /// Use a preconfigured reqwest client. Proxy settings and timeouts are
    /// whatever `http` was built with.
    pub fn with_http_client(base_url: impl AsRef<str>, http: Client) -> Result<Self, FigmaError> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get_file(
        &self,
        auth: &FigmaAuth,
        file_key: &str,
    ) -> Result<FigmaFile, FigmaError> {
        let url = self.endpoint(&format!("/v1/files/{file_key}"))?;
        tracing::debug!(%url, "fetching figma file");
        let req = auth.apply(self.http.get(url));
        self.send_json(req).await
    }

    pub async fn render_images(
        &self,
        auth: &FigmaAuth,
        file_key: &str,
        node_ids: &[String],
        options: ImageExportOptions,
    ) -> Result<ImageMap, FigmaError> {
        let url = self.endpoint(&format!("/v1/images/{file_key}"))?;
        tracing::debug!(%url, nodes = node_ids.len(), "requesting figma image renders");
        let body = ImageRenderRequest {
            ids: node_ids.join(","),
            format: options.format.as_str(),
            scale: options.scale,
        };
        let req = auth.apply(self.http.post(url).json(&body));
        let response: ImageRenderResponse = self.send_json(req).await?;

        match response.err {
            Some(err) if !err.is_empty() => Err(FigmaError::Render(err)),
            _ => Ok(response.images),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, FigmaError> {
        Ok(self.base_url.join(path)?)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, FigmaError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(60);
            return Err(FigmaError::RateLimited(retry_after));
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(FigmaError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| FigmaError::Decode(e.to_string()))
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    parsed
        .as_ref()
        .and_then(|value| value.get("err").or_else(|| value.get("message")))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("Figma API returned status {}", status.as_u16()))
}
