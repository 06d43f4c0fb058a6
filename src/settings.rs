use std::path::{Path, PathBuf};

use f2h_lib::config::MAX_IMAGE_SCALE;
use f2h_lib::{Config, F2hError, ImageExportOptions};

use crate::cli::ArtifactArgs;

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/f2h/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, F2hError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        F2hError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        F2hError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Where a generated page should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactTarget {
    /// Raw HTML on stdout.
    Stdout,
    /// An exact file path.
    File(PathBuf),
    /// A timestamped file inside this directory.
    Dir(PathBuf),
}

/// CLI flags win; then `artifacts.dir` from config; then the working directory.
pub fn resolve_artifact_target(args: &ArtifactArgs, config: &Config) -> ArtifactTarget {
    if args.stdout {
        return ArtifactTarget::Stdout;
    }
    if let Some(path) = &args.output {
        return ArtifactTarget::File(path.clone());
    }
    if let Some(dir) = &args.out_dir {
        return ArtifactTarget::Dir(dir.clone());
    }
    ArtifactTarget::Dir(
        config
            .artifacts
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(".")),
    )
}

/// Config image options with an optional `--scale` override.
pub fn resolve_image_options(
    cli_scale: Option<f32>,
    config: &Config,
) -> Result<ImageExportOptions, F2hError> {
    let mut options = config.image_options();
    if let Some(scale) = cli_scale {
        if !(scale > 0.0 && scale <= MAX_IMAGE_SCALE) {
            return Err(F2hError::Config(format!(
                "--scale must be in (0, {MAX_IMAGE_SCALE}], got {scale}"
            )));
        }
        options.scale = scale;
    }
    Ok(options)
}

/// Format effective config as a single-line string.
pub fn format_effective_config(config: &Config, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: bind={}, export_errors={:?}, api_base={}, timeout={}s, image={}@{}x, artifacts={}",
        config.server.bind,
        config.server.export_errors,
        config.figma.api_base,
        config.figma.timeout.as_secs(),
        config.figma.image_format.as_str(),
        config.figma.image_scale,
        config
            .artifacts
            .dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| ".".to_string())
    )
}

/// Log effective config (verbose mode).
pub fn log_effective_config(config: &Config, config_source: Option<&Path>) {
    tracing::debug!("{}", format_effective_config(config, config_source));
}

#[cfg(test)]
mod tests {
    use super::*;
    use f2h_lib::ExportErrorMode;
    use std::time::Duration;

    #[test]
    fn stdout_flag_wins() {
        let args = ArtifactArgs {
            output: None,
            out_dir: None,
            stdout: true,
        };
        assert_eq!(
            resolve_artifact_target(&args, &Config::default()),
            ArtifactTarget::Stdout
        );
    }

    #[test]
    fn cli_paths_override_config_dir() {
        let mut cfg = Config::default();
        cfg.artifacts.dir = Some(PathBuf::from("from-config"));

        let file = ArtifactArgs {
            output: Some(PathBuf::from("page.html")),
            ..ArtifactArgs::default()
        };
        assert_eq!(
            resolve_artifact_target(&file, &cfg),
            ArtifactTarget::File(PathBuf::from("page.html"))
        );

        let dir = ArtifactArgs {
            out_dir: Some(PathBuf::from("cli-dir")),
            ..ArtifactArgs::default()
        };
        assert_eq!(
            resolve_artifact_target(&dir, &cfg),
            ArtifactTarget::Dir(PathBuf::from("cli-dir"))
        );

        assert_eq!(
            resolve_artifact_target(&ArtifactArgs::default(), &cfg),
            ArtifactTarget::Dir(PathBuf::from("from-config"))
        );
    }

    #[test]
    fn defaults_to_working_directory() {
        assert_eq!(
            resolve_artifact_target(&ArtifactArgs::default(), &Config::default()),
            ArtifactTarget::Dir(PathBuf::from("."))
        );
    }

    #[test]
    fn scale_override_is_validated() {
        let cfg = Config::default();
        assert!((resolve_image_options(None, &cfg).unwrap().scale - 2.0).abs() < f32::EPSILON);
        assert!((resolve_image_options(Some(1.0), &cfg).unwrap().scale - 1.0).abs() < f32::EPSILON);
        assert!(resolve_image_options(Some(0.0), &cfg).is_err());
        assert!(resolve_image_options(Some(8.0), &cfg).is_err());
    }

    #[test]
    fn format_effective_config_includes_all_fields() {
        let mut cfg = Config::default();
        cfg.server.export_errors = ExportErrorMode::Generic;
        cfg.figma.timeout = Duration::from_secs(12);
        let summary = format_effective_config(&cfg, Some(Path::new("f2h.toml")));

        assert!(summary.contains("bind=127.0.0.1:3000"));
        assert!(summary.contains("export_errors=Generic"));
        assert!(summary.contains("api_base=https://api.figma.com"));
        assert!(summary.contains("timeout=12s"));
        assert!(summary.contains("image=png@2x"));
        assert!(summary.contains("f2h.toml"));
    }

    #[test]
    fn missing_explicit_config_is_a_config_error() {
        let err = load_config(Some(Path::new("/no/such/f2h.toml"))).unwrap_err();
        assert!(matches!(err, F2hError::Config(_)));
        assert!(err.to_string().contains("/no/such/f2h.toml"));
    }
}
