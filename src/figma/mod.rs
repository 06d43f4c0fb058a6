//! Figma REST API integration.
//!
//! This module provides:
//! - [`FigmaClient`] - HTTP client for the file and image-render endpoints
//! - [`layout`] - translation of a node tree into positioned HTML/CSS
//! - API types for parsing Figma JSON responses

pub mod api_types;
pub mod client;
pub mod layout;

#[cfg(test)]
mod tests;

pub use client::{map_figma_error, FigmaAuth, FigmaClient, FigmaError};
pub use layout::{render_layout, select_nodes, top_level_ids};

pub use api_types::{
    FigmaBoundingBox, FigmaColor, FigmaFile, FigmaNodeData, FigmaPaintData, FigmaTypeStyle,
    ImageExportOptions, ImageFormat, ImageMap,
};
