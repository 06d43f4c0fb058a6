//! Figma to HTML (f2h) Library
//!
//! Turns Figma design links into standalone HTML documents, either as a live
//! embed of Figma's hosted viewer or, given an access token, as positioned
//! HTML/CSS built from the Figma REST API.
//!
//! # Module Overview
//!
//! - [`design_ref`] - Figma URL parsing and file key validation
//! - [`embed`] - Embed page generation
//! - [`export`] - Authenticated export pipeline
//! - [`figma`] - Figma API client, payload types and layout translation
//! - [`artifact`] - Artifact file naming and saving
//! - [`server`] - HTTP API and browser UI
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use f2h_lib::{export_design, ExportRequest, FigmaAuth, FigmaClient};
//!
//! # async fn example() -> f2h_lib::Result<()> {
//! let client = FigmaClient::new().map_err(f2h_lib::figma::map_figma_error)?;
//! let auth = FigmaAuth::Bearer("figd_...".to_string());
//! let request = ExportRequest::new("ABC123", vec![]);
//! let document = export_design(&client, &auth, &request).await?;
//! println!("{}", document.html);
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod clock;
pub mod config;
pub mod design_ref;
pub mod embed;
pub mod error;
pub mod export;
pub mod figma;
pub mod output;
pub mod server;
pub mod template;
pub mod ui;

pub use artifact::{artifact_file_name, save_artifact};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ExportErrorMode};
pub use design_ref::{parse_design_url, resolve_file_key, DesignRefError, DesignReference};
pub use embed::{embed_url, render_embed};
pub use error::{ErrorKind, F2hError, Result};
pub use export::{export_design, ExportRequest, GeneratedDocument};
pub use figma::{FigmaAuth, FigmaClient, FigmaError, ImageExportOptions, ImageFormat, ImageMap};
pub use output::{
    EmbedOutput, EmbedResponse, ErrorOutput, ErrorResponse, ExportOutput, ExportResponse,
    F2hOutput, F2H_OUTPUT_VERSION,
};
pub use server::{router, run_server, ServerState};
