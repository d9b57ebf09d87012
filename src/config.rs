//! Configuration types for the devkit tools.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevkitConfig {
    /// Configuration version
    pub version: String,
    /// Curl rewrite settings
    pub curl: RewriteConfig,
    /// JSON formatting settings
    pub viewer: ViewerSettings,
}

impl Default for DevkitConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            curl: RewriteConfig::default(),
            viewer: ViewerSettings::default(),
        }
    }
}

impl DevkitConfig {
    /// Load a configuration file, choosing YAML or JSON by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Parse a YAML configuration string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON configuration string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Curl rewrite configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RewriteConfig {
    /// URL to replace (empty = auto-extract from the command)
    pub url_from: String,
    /// Replacement URL
    pub url_to: String,
    /// Header toggles; `true` removes the header in normal mode
    pub disabled_headers: BTreeMap<String, bool>,
    /// Bearer token to inject into the Authorization header
    pub new_token: Option<String>,
    /// Strip the fixed list of non-essential headers instead
    pub minimize: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        let disabled_headers = ["Authorization", "User-Agent"]
            .into_iter()
            .map(|name| (name.to_string(), false))
            .collect();

        Self {
            url_from: String::new(),
            url_to: String::new(),
            disabled_headers,
            new_token: None,
            minimize: false,
        }
    }
}

impl RewriteConfig {
    /// Check whether a header is toggled off (case-insensitive).
    pub fn is_header_disabled(&self, name: &str) -> bool {
        self.disabled_headers
            .iter()
            .any(|(header, disabled)| *disabled && header.eq_ignore_ascii_case(name))
    }

    /// Toggle a header off.
    pub fn disable_header(&mut self, name: impl Into<String>) {
        self.disabled_headers.insert(name.into(), true);
    }

    /// Token to inject, if any non-empty one was configured.
    pub fn token(&self) -> Option<&str> {
        self.new_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// JSON output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerSettings {
    /// Spaces per indentation level (0 = compact)
    pub indent_width: usize,
    /// Sort object keys recursively
    pub sort_keys: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            indent_width: 4,
            sort_keys: false,
        }
    }
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
