//! Figma design URL parsing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// A Figma design identified by its file key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignReference {
    pub raw_url: String,
    pub file_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesignRefError {
    #[error("no Figma file key found in '{value}'. Hint: use https://www.figma.com/file/<FILE_KEY>/... or https://www.figma.com/design/<FILE_KEY>/...")]
    InvalidUrl { value: String },
    #[error("'{value}' is not a Figma URL or file key (keys contain only letters, digits, '_' and '-')")]
    InvalidFileKey { value: String },
}

fn key_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+").expect("file key pattern is valid"))
}

fn embedded_design_url() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?:^|[^A-Za-z0-9.-])(?:[A-Za-z0-9-]+\.)*figma\.com/(?:file|design)/([A-Za-z0-9_-]+)",
        )
        .expect("design url pattern is valid")
    })
}

fn whole_key() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("file key pattern is valid"))
}

/// Returns true when `value` is shaped like a Figma file key.
pub fn is_valid_file_key(value: &str) -> bool {
    whole_key().is_match(value)
}

/// Parse a Figma `/file/<key>` or `/design/<key>` URL.
///
/// URLs without a scheme (`www.figma.com/file/...`) are accepted. The host must
/// be `figma.com` or one of its subdomains.
pub fn parse_design_url(value: &str) -> Result<DesignReference, DesignRefError> {
    let trimmed = value.trim();
    let invalid = || DesignRefError::InvalidUrl {
        value: value.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid());
    }

    if let Some(url) = parse_lenient(trimmed) {
        // A parseable URL is judged on its host alone.
        if !is_figma_host(url.host_str().unwrap_or("")) {
            return Err(invalid());
        }
        let file_key = file_key_from_path(&url).ok_or_else(invalid)?;
        let node_id = url
            .query_pairs()
            .find(|(k, _)| k == "node-id")
            .map(|(_, v)| v.replace('-', ":"))
            .filter(|v| !v.is_empty());

        return Ok(DesignReference {
            raw_url: value.to_string(),
            file_key,
            node_id,
        });
    }

    // Free text that merely contains a design link.
    embedded_design_url()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| DesignReference {
            raw_url: value.to_string(),
            file_key: m.as_str().to_string(),
            node_id: None,
        })
        .ok_or_else(invalid)
}

/// Accept either a Figma URL or a bare file key and return the key.
pub fn resolve_file_key(value: &str) -> Result<String, DesignRefError> {
    if let Ok(design) = parse_design_url(value) {
        return Ok(design.file_key);
    }

    let trimmed = value.trim();
    if is_valid_file_key(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(DesignRefError::InvalidFileKey {
            value: value.to_string(),
        })
    }
}

fn parse_lenient(value: &str) -> Option<Url> {
    match Url::parse(value) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{value}")).ok()
        }
        Err(_) => None,
    }
}

fn is_figma_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == "figma.com" || host.ends_with(".figma.com")
}

fn file_key_from_path(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();

    segments
        .iter()
        .position(|&s| s == "file" || s == "design")
        .and_then(|i| segments.get(i + 1))
        .and_then(|segment| key_prefix().find(segment))
        .map(|m| m.as_str().to_string())
}
