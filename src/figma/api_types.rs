//! Figma REST API payloads.

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node id → rendered image URL. `None` means Figma could not render the node.
pub type ImageMap = BTreeMap<String, Option<String>>;

/// Supported image export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

/// Options for the image-render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageExportOptions {
    pub format: ImageFormat,
    pub scale: f32,
}

impl Default for ImageExportOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            scale: 2.0,
        }
    }
}

/// Response of `GET /v1/files/{key}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub document: FigmaNodeData,
}

/// One node of a Figma document tree. The document root is a node too.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNodeData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub children: Vec<FigmaNodeData>,
    pub absolute_bounding_box: Option<FigmaBoundingBox>,
    pub characters: Option<String>,
    pub style: Option<FigmaTypeStyle>,
    #[serde(default)]
    pub fills: Vec<FigmaPaintData>,
    #[serde(default)]
    pub strokes: Vec<FigmaPaintData>,
    pub stroke_weight: Option<f32>,
    pub corner_radius: Option<f32>,
    pub opacity: Option<f32>,
}

impl FigmaNodeData {
    pub fn is_text(&self) -> bool {
        self.node_type.eq_ignore_ascii_case("TEXT")
    }

    pub fn is_canvas(&self) -> bool {
        self.node_type.eq_ignore_ascii_case("CANVAS")
    }
}

fn default_true() -> bool {
    true
}

/// Absolute position and size in document pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaBoundingBox {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

/// Typography style from Figma.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaTypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<f32>,
    pub line_height_px: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub text_align_horizontal: Option<String>,
    pub italic: Option<bool>,
}

/// Paint/fill data from Figma.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaPaintData {
    #[serde(rename = "type")]
    pub paint_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub color: Option<FigmaColor>,
    pub opacity: Option<f32>,
}

impl FigmaPaintData {
    /// CSS color of a visible solid paint; `None` for gradients, images, etc.
    pub fn solid_css(&self) -> Option<String> {
        if !self.visible || !self.paint_type.eq_ignore_ascii_case("SOLID") {
            return None;
        }
        self.color
            .as_ref()
            .map(|color| color.to_css(self.opacity.unwrap_or(1.0)))
    }
}

/// RGBA color from Figma (0.0-1.0 range).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl FigmaColor {
    fn to_srgb8(self) -> Srgb<u8> {
        Srgb::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
        .into_format()
    }

    /// Convert to hex color string (e.g., "#ff8000").
    pub fn to_hex(&self) -> String {
        let rgb = self.to_srgb8();
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
    }

    /// Hex when opaque, `rgba()` otherwise. `opacity` multiplies the color alpha.
    pub fn to_css(&self, opacity: f32) -> String {
        let alpha = (self.a * opacity).clamp(0.0, 1.0);
        if alpha >= 0.999 {
            return self.to_hex();
        }
        let rgb = self.to_srgb8();
        format!(
            "rgba({}, {}, {}, {})",
            rgb.red,
            rgb.green,
            rgb.blue,
            (alpha * 100.0).round() / 100.0
        )
    }
}

/// Body of `POST /v1/images/{key}`.
#[derive(Debug, Serialize)]
pub struct ImageRenderRequest<'a> {
    pub ids: String,
    pub format: &'a str,
    pub scale: f32,
}

/// Response of the image-render endpoint.
#[derive(Debug, Deserialize)]
pub struct ImageRenderResponse {
    #[serde(default)]
    pub err: Option<String>,
    #[serde(default)]
    pub images: ImageMap,
}
