use crate::error::{ErrorKind, ErrorPayload};
use crate::figma::api_types::ImageMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Schema version for CLI output payloads.
pub const F2H_OUTPUT_VERSION: &str = "0.1.0";

/// Message of the collapsed export error.
pub const EXPORT_FAILED: &str = "Export failed";

// HTTP bodies

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedResponse {
    pub success: bool,
    pub html: String,
    pub file_key: String,
    pub embed_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    pub html: String,
    pub images: ImageMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl ErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: None,
        }
    }
}

// CLI documents

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum F2hOutput {
    Embed(EmbedOutput),
    Export(ExportOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedOutput {
    pub version: String,
    pub file_key: String,
    pub embed_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutput {
    pub version: String,
    pub file_key: String,
    pub node_ids: Vec<String>,
    pub images: ImageMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    pub error: ErrorPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
