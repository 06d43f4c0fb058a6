use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::figma::api_types::{ImageExportOptions, ImageFormat};
use crate::figma::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const MAX_IMAGE_SCALE: f32 = 4.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub figma: FigmaConfig,
    pub artifacts: ArtifactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub export_errors: ExportErrorMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            export_errors: ExportErrorMode::default(),
        }
    }
}

/// How the export endpoint reports failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportErrorMode {
    /// Status and `kind` follow the error.
    #[default]
    Detailed,
    /// Every failure is `500 {"error": "Export failed"}`.
    Generic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigmaConfig {
    pub api_base: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub image_format: ImageFormat,
    pub image_scale: f32,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            image_format: ImageFormat::Png,
            image_scale: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Where generated pages are written when no output path is given.
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load `path`, else the central config if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::central_config_path() {
                Some(central) if central.is_file() => Self::from_file(&central),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `~/.config/f2h/config.toml`
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(".config").join("f2h").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.figma.image_scale;
        if !(scale > 0.0 && scale <= MAX_IMAGE_SCALE) {
            return Err(ConfigError::Invalid(format!(
                "figma.image_scale must be in (0, {MAX_IMAGE_SCALE}], got {scale}"
            )));
        }
        if self.figma.timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "figma.timeout must be greater than zero".to_string(),
            ));
        }
        let base = Url::parse(&self.figma.api_base).map_err(|e| {
            ConfigError::Invalid(format!(
                "figma.api_base is not a valid URL ({}): {e}",
                self.figma.api_base
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "figma.api_base must use http or https, got {}",
                base.scheme()
            )));
        }
        Ok(())
    }

    pub fn image_options(&self) -> ImageExportOptions {
        ImageExportOptions {
            format: self.figma.image_format,
            scale: self.figma.image_scale,
        }
    }
}
