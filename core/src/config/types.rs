//! Minimal configuration types for viewroute core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;

/// Default number of history entries kept by the router
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Normalized base URL path prefix the application is served under.
///
/// Stored with a leading slash and without a trailing one, so the root
/// base (`/`) is represented by the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct BasePath(String);

impl BasePath {
    /// Base for an application served at the site root
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse and normalize a base prefix such as `/app/`, `app` or `https://host/app/`
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = raw.as_ref().trim();

        // Absolute URLs contribute only their path
        let path = if raw.contains("://") {
            url::Url::parse(raw)
                .map_err(|e| ConfigError::InvalidValue {
                    field: "base_url".to_string(),
                    value: format!("{} ({})", raw, e),
                })?
                .path()
                .to_string()
        } else {
            raw.to_string()
        };

        if path.contains(['?', '#']) {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: raw.to_string(),
            });
        }

        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        if trimmed.starts_with('/') {
            Ok(Self(trimmed.to_string()))
        } else {
            Ok(Self(format!("/{}", trimmed)))
        }
    }

    /// The normalized prefix, empty for the root base
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the application is served from the site root
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Prefix an application path with the base to get a browser href
    pub fn href(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.0, path)
        } else {
            format!("{}/{}", self.0, path)
        }
    }

    /// Strip the base from a browser path, leaving paths outside the base untouched
    pub fn strip(&self, full: &str) -> String {
        if self.is_root() || full.len() < self.0.len() || !full.is_char_boundary(self.0.len()) {
            return full.to_string();
        }

        let (head, rest) = full.split_at(self.0.len());
        if !head.eq_ignore_ascii_case(&self.0) {
            return full.to_string();
        }

        match rest.chars().next() {
            None => "/".to_string(),
            Some('/') => rest.to_string(),
            // Query or hash directly after the base is anchored at the application root
            Some('?') | Some('#') => format!("/{}", rest),
            Some(_) => full.to_string(),
        }
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl TryFrom<String> for BasePath {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A fully resolved router configuration ready for use by core.
///
/// Deserializes from the config file schema; unknown keys are rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterOptions {
    /// Base URL path prefix
    #[serde(default, rename = "base_url")]
    pub base: BasePath,
    /// Maximum number of history entries kept
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Reuse resolved components on repeat navigation
    #[serde(default = "default_true")]
    pub cache_components: bool,
    /// Compare static path segments case-sensitively
    #[serde(default)]
    pub sensitive: bool,
    /// Treat a trailing slash as significant
    #[serde(default)]
    pub strict: bool,
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

fn default_true() -> bool {
    true
}

impl RouterOptions {
    /// Options for an application served under `base`
    pub fn with_base(base: BasePath) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Disable component reuse so every navigation invokes the loader
    pub fn without_component_cache(mut self) -> Self {
        self.cache_components = false;
        self
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            base: BasePath::root(),
            max_history: DEFAULT_MAX_HISTORY,
            cache_components: true,
            sensitive: false,
            strict: false,
        }
    }
}
