//! Client configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use hub_catalog::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use hub_data::{TimeoutConfig, DEFAULT_API_URL};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "policyhub.toml";

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "POLICYHUB_API_URL";

/// Policy Hub client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, e.g. `https://hub.example.com/api/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Presentation limits and timings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Search input debounce.
    pub debounce_ms: u64,
    pub default_page_size: u32,
    /// Page numbers shown around the current page.
    pub max_visible_pages: u32,
    pub max_visible_categories: usize,
    pub max_visible_providers: usize,
    pub max_visible_platforms: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: 5,
            max_visible_categories: 8,
            max_visible_providers: 5,
            max_visible_platforms: 5,
        }
    }
}

impl HubConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Load from `path`, else from [`DEFAULT_CONFIG_FILE`] if present, else
    /// defaults; then apply environment overrides.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Apply [`API_URL_ENV`] if set.
    pub fn with_env_overrides(self) -> Self {
        let url = std::env::var(API_URL_ENV).ok();
        self.with_api_url_override(url)
    }

    fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!(base_url = %url, "API URL taken from environment");
            self.api.base_url = url;
        }
        self
    }

    /// Set the API root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    /// Request timeouts.
    pub fn timeout(&self) -> TimeoutConfig {
        TimeoutConfig::from_millis(self.api.timeout_ms)
    }

    /// Search input debounce.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.ui.debounce_ms)
    }

    /// Default page size, kept within the API's bounds.
    pub fn default_page_size(&self) -> u32 {
        self.ui.default_page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HubConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.default_page_size(), 20);
    }

    #[test]
    fn test_partial_toml() {
        let config: HubConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://hub.example.com/api/v1"

            [ui]
            debounce_ms = 150
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://hub.example.com/api/v1");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.ui.debounce_ms, 150);
        assert_eq!(config.ui.max_visible_pages, 5);
    }

    #[test]
    fn test_load_json_by_extension() {
        let path = std::env::temp_dir().join(format!("policyhub-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"api": {"timeout_ms": 2500}}"#).unwrap();
        let config = HubConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.timeout().total, Duration::from_millis(2500));
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = HubConfig::load("/nonexistent/policyhub.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_api_url_override() {
        let config = HubConfig::default().with_api_url_override(Some("http://hub:9000".into()));
        assert_eq!(config.api.base_url, "http://hub:9000");

        let config = HubConfig::default().with_api_url_override(Some("  ".into()));
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_page_size_is_bounded() {
        let mut config = HubConfig::default();
        config.ui.default_page_size = 500;
        assert_eq!(config.default_page_size(), MAX_PAGE_SIZE);
    }
}
