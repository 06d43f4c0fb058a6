//! Tests for Figma payload decoding and the API client.

use crate::figma::api_types::{
    FigmaColor, FigmaFile, FigmaPaintData, ImageExportOptions, ImageFormat, ImageRenderRequest,
    ImageRenderResponse,
};
use crate::figma::client::{FigmaAuth, FigmaClient, FigmaError};
use crate::figma::layout::top_level_ids;
use std::time::Duration;

#[test]
fn test_image_format_as_str() {
    assert_eq!(ImageFormat::Png.as_str(), "png");
    assert_eq!(ImageFormat::Jpg.as_str(), "jpg");
    assert_eq!(ImageFormat::Svg.as_str(), "svg");
    assert_eq!(ImageFormat::Pdf.as_str(), "pdf");
}

#[test]
fn test_figma_color_to_hex() {
    let color = FigmaColor {
        r: 1.0,
        g: 0.2,
        b: 0.0,
        a: 1.0,
    };
    assert_eq!(color.to_hex(), "#ff3300");
}

#[test]
fn test_figma_color_to_hex_black() {
    let color = FigmaColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    assert_eq!(color.to_hex(), "#000000");
}

#[test]
fn translucent_color_uses_rgba() {
    let color = FigmaColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.5,
    };
    assert_eq!(color.to_css(1.0), "rgba(0, 0, 0, 0.5)");
    assert_eq!(color.to_css(0.5), "rgba(0, 0, 0, 0.25)");
}

#[test]
fn only_visible_solid_paints_have_css() {
    let paint: FigmaPaintData = serde_json::from_str(
        r#"{"type":"SOLID","color":{"r":1,"g":1,"b":1,"a":1}}"#,
    )
    .unwrap();
    assert_eq!(paint.solid_css().as_deref(), Some("#ffffff"));

    let hidden: FigmaPaintData = serde_json::from_str(
        r#"{"type":"SOLID","visible":false,"color":{"r":1,"g":1,"b":1,"a":1}}"#,
    )
    .unwrap();
    assert!(hidden.solid_css().is_none());

    let gradient: FigmaPaintData =
        serde_json::from_str(r#"{"type":"GRADIENT_LINEAR"}"#).unwrap();
    assert!(gradient.solid_css().is_none());
}

#[test]
fn file_response_decodes_sparse_nodes() {
    let file: FigmaFile = serde_json::from_str(
        r#"{
            "name": "Landing",
            "lastModified": "2024-05-01T12:00:00Z",
            "document": {
                "id": "0:0",
                "type": "DOCUMENT",
                "children": [{
                    "id": "0:1",
                    "type": "CANVAS",
                    "children": [
                        {"id": "1:1", "type": "FRAME", "name": "Hero",
                         "absoluteBoundingBox": {"x": 0, "y": 0, "width": 1440, "height": 900}},
                        {"id": "1:2", "type": "TEXT", "visible": false, "characters": "hi"}
                    ]
                }]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(file.name.as_deref(), Some("Landing"));
    let page = &file.document.children[0];
    assert!(page.is_canvas());
    assert!(page.children[0].visible);
    assert!(!page.children[1].visible);
    assert!(page.children[1].absolute_bounding_box.is_none());
    assert_eq!(top_level_ids(&file.document), vec!["1:1", "1:2"]);
}

#[test]
fn image_request_body_matches_render_endpoint() {
    let options = ImageExportOptions::default();
    let body = ImageRenderRequest {
        ids: ["1:1", "1:2"].join(","),
        format: options.format.as_str(),
        scale: options.scale,
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"ids": "1:1,1:2", "format": "png", "scale": 2.0})
    );
}

#[test]
fn image_response_keeps_null_entries() {
    let response: ImageRenderResponse = serde_json::from_str(
        r#"{"err": null, "images": {"1:1": "https://cdn.example/a.png", "1:2": null}}"#,
    )
    .unwrap();
    assert_eq!(response.images.len(), 2);
    assert_eq!(response.images["1:2"], None);
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = FigmaClient::with_base_url_and_timeout("not a url", Duration::from_secs(1));
    assert!(matches!(result, Err(FigmaError::InvalidBaseUrl(_))));
}

#[tokio::test]
async fn get_file_propagates_request_error() {
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(2))
        .build()
        .expect("http client");
    let client = FigmaClient::with_http_client("http://127.0.0.1:1", http).expect("client");
    let auth = FigmaAuth::Bearer("token".into());

    let result = client.get_file(&auth, "ABC123").await;

    assert!(
        matches!(result, Err(FigmaError::Request(_))),
        "expected request error, got {:?}",
        result
    );
}
