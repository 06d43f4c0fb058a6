use crate::design_ref::DesignRefError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum F2hError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid Figma URL: {0}")]
    InvalidUrl(#[from] DesignRefError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Figma rejected the access token (status: {status}): {message}")]
    UpstreamAuth { status: u16, message: String },

    #[error("Figma file or node not found: {message}")]
    UpstreamNotFound { message: String },

    #[error("Figma API error (status: {status:?}): {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Machine-readable error kind, surfaced by the export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    InvalidUrl,
    InvalidRequest,
    UpstreamAuth,
    UpstreamNotFound,
    Upstream,
    Network,
    Config,
    Io,
    Serialization,
}

impl F2hError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        F2hError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        F2hError::InvalidRequest(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            F2hError::Io(_) => ErrorKind::Io,
            F2hError::Network(_) => ErrorKind::Network,
            F2hError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            F2hError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            F2hError::UpstreamAuth { .. } => ErrorKind::UpstreamAuth,
            F2hError::UpstreamNotFound { .. } => ErrorKind::UpstreamNotFound,
            F2hError::Upstream { .. } => ErrorKind::Upstream,
            F2hError::Serialization(_) => ErrorKind::Serialization,
            F2hError::Config(_) => ErrorKind::Config,
        }
    }

    /// HTTP status the server answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidUrl | ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::UpstreamAuth => StatusCode::UNAUTHORIZED,
            ErrorKind::UpstreamNotFound => StatusCode::NOT_FOUND,
            ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
            ErrorKind::Network => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::Config | ErrorKind::Io | ErrorKind::Serialization => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            F2hError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check the output path exists and is writable.",
            ),
            F2hError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry; raise figma.timeout for large files.",
            ),
            F2hError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Use a Figma URL such as https://www.figma.com/file/<FILE_KEY>/Name or https://www.figma.com/design/<FILE_KEY>/Name.",
            ),
            F2hError::InvalidRequest(msg) => ErrorPayload::new(
                ErrorCategory::Input,
                msg.to_string(),
                "Provide a file key (or Figma URL) and a non-empty access token.",
            ),
            F2hError::UpstreamAuth { .. } => ErrorPayload::new(
                ErrorCategory::Figma,
                self.to_string(),
                "Check FIGMA_TOKEN/FIGMA_OAUTH_TOKEN is valid, unexpired and has access to the file.",
            ),
            F2hError::UpstreamNotFound { .. } => ErrorPayload::new(
                ErrorCategory::Figma,
                self.to_string(),
                "Verify the file key and node ids; the file may have been moved or deleted.",
            ),
            F2hError::Upstream { .. } => ErrorPayload::new(
                ErrorCategory::Figma,
                self.to_string(),
                "Figma returned an unexpected response; check rate limits and retry after waiting.",
            ),
            F2hError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Internal,
                e.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
            F2hError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("figma_token") || lower.contains("figma token") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN) before running exports.",
                    )
                } else if lower.contains("bind") || lower.contains("address") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Choose a free address with --bind HOST:PORT or server.bind in the config file.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags and the config file (--config PATH).",
                    )
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, F2hError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Input,
    Config,
    Network,
    Figma,
    Io,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
