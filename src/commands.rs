mod embed;
mod export;
mod serve;

pub use embed::run_embed;
pub use export::run_export;
pub use serve::run_serve;

use std::path::{Path, PathBuf};

use f2h_lib::{save_artifact, Clock, F2hError};

use crate::settings::ArtifactTarget;

/// Write `html` to its target. Returns the file written, if any.
pub(crate) fn deliver_artifact(
    html: &str,
    target: &ArtifactTarget,
    clock: &dyn Clock,
) -> Result<Option<PathBuf>, F2hError> {
    match target {
        ArtifactTarget::Stdout => {
            print!("{html}");
            Ok(None)
        }
        ArtifactTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, html)?;
            tracing::debug!(path = %path.display(), bytes = html.len(), "wrote html artifact");
            Ok(Some(path.clone()))
        }
        ArtifactTarget::Dir(dir) => save_artifact(dir, html, clock).map(Some),
    }
}

/// Logs the config summary when `--verbose` is on.
pub(crate) fn log_config(verbose: bool, config: &f2h_lib::Config, source: Option<&Path>) {
    if verbose {
        crate::settings::log_effective_config(config, source);
    }
}
