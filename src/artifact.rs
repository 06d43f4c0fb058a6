use std::fs;
use std::path::{Path, PathBuf};

use crate::clock::Clock;
use crate::Result;

pub const ARTIFACT_PREFIX: &str = "figma-export-";

/// `figma-export-<unix-ms>.html`
pub fn artifact_file_name(clock: &dyn Clock) -> String {
    format!("{ARTIFACT_PREFIX}{}.html", clock.now().timestamp_millis())
}

/// Write `html` into `dir` under a timestamped artifact name.
pub fn save_artifact(dir: &Path, html: &str, clock: &dyn Clock) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(artifact_file_name(clock));
    fs::write(&path, html)?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "saved html artifact");
    Ok(path)
}
