//! Authenticated export: Figma document + image renders → standalone HTML.

use serde::Serialize;

use crate::design_ref::is_valid_file_key;
use crate::figma::api_types::{ImageExportOptions, ImageMap};
use crate::figma::{map_figma_error, render_layout, select_nodes, top_level_ids};
use crate::figma::{FigmaAuth, FigmaClient, FigmaNodeData};
use crate::{F2hError, Result};

const DEFAULT_TITLE: &str = "Figma Export";

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub file_key: String,
    /// Empty means every top-level frame of the document.
    pub node_ids: Vec<String>,
    pub options: ImageExportOptions,
}

impl ExportRequest {
    pub fn new(file_key: impl Into<String>, node_ids: Vec<String>) -> Self {
        Self {
            file_key: file_key.into(),
            node_ids,
            options: ImageExportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ImageExportOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub html: String,
    pub images: ImageMap,
}

/// The caller's ids with blanks dropped, or the document's top-level ids.
pub fn target_node_ids(document: &FigmaNodeData, requested: &[String]) -> Vec<String> {
    let requested: Vec<String> = requested
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect();
    if requested.is_empty() {
        top_level_ids(document)
    } else {
        requested
    }
}

/// Fetch the file, render the target nodes as images and lay everything out.
///
/// The two upstream calls are sequential; the image call is only issued once
/// the file fetch has succeeded.
pub async fn export_design(
    client: &FigmaClient,
    auth: &FigmaAuth,
    request: &ExportRequest,
) -> Result<GeneratedDocument> {
    if !is_valid_file_key(&request.file_key) {
        return Err(F2hError::invalid_request(format!(
            "Invalid Figma file key: {:?}",
            request.file_key
        )));
    }
    if auth.is_empty() {
        return Err(F2hError::invalid_request("A Figma access token is required"));
    }

    let file = client
        .get_file(auth, &request.file_key)
        .await
        .map_err(|err| {
            tracing::warn!(file_key = %request.file_key, error = %err, "figma file fetch failed");
            map_figma_error(err)
        })?;
    tracing::debug!(
        file_key = %request.file_key,
        name = file.name.as_deref().unwrap_or_default(),
        "fetched figma document"
    );

    let ids = target_node_ids(&file.document, &request.node_ids);
    let images = if ids.is_empty() {
        tracing::debug!("document has no exportable nodes; skipping image renders");
        ImageMap::new()
    } else {
        client
            .render_images(auth, &request.file_key, &ids, request.options)
            .await
            .map_err(|err| {
                tracing::warn!(file_key = %request.file_key, error = %err, "figma image render failed");
                map_figma_error(err)
            })?
    };
    tracing::debug!(
        requested = ids.len(),
        rendered = images.values().filter(|url| url.is_some()).count(),
        "received image renders"
    );

    let roots = select_nodes(&file.document, &ids);
    let title = file
        .name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(DEFAULT_TITLE);
    let html = render_layout(title, &roots, &images);

    Ok(GeneratedDocument { html, images })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn document(json: &str) -> FigmaNodeData {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn explicit_ids_are_used_verbatim() {
        let doc = document(r#"{"id":"0:0","type":"DOCUMENT","children":[]}"#);
        let ids = target_node_ids(&doc, &["5:5".into(), " ".into(), "1:2".into()]);
        assert_eq!(ids, vec!["5:5", "1:2"]);
    }

    #[test]
    fn missing_ids_fall_back_to_top_level() {
        let doc = document(
            r#"{"id":"0:0","type":"DOCUMENT","children":[
                {"id":"0:1","type":"CANVAS","children":[{"id":"1:1","type":"FRAME"}]}
            ]}"#,
        );
        assert_eq!(target_node_ids(&doc, &[]), vec!["1:1"]);
    }

    #[tokio::test]
    async fn invalid_file_key_is_rejected_before_any_request() {
        let client =
            FigmaClient::with_base_url_and_timeout("http://127.0.0.1:1", Duration::from_secs(1))
                .unwrap();
        let auth = FigmaAuth::Bearer("token".into());

        let err = export_design(&client, &auth, &ExportRequest::new("bad key!", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, F2hError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let client = FigmaClient::new().unwrap();
        let auth = FigmaAuth::Bearer("   ".into());

        let err = export_design(&client, &auth, &ExportRequest::new("ABC123", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, F2hError::InvalidRequest(_)));
    }
}
