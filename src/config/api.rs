//! Remote catalog API configuration.
//!
//! The base URL defaults to the public catalog service and can be replaced
//! with the `CATALOG_API_URL` environment variable.

use serde::Deserialize;
use std::time::Duration;

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_VAR: &str = "CATALOG_API_URL";

const DEFAULT_API_URL: &str = "https://dummyjson.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the catalog API lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; endpoints are appended to it
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Replaces the base URL with `CATALOG_API_URL` when it is set and non-empty.
    #[must_use]
    pub fn with_env_override(self) -> Self {
        self.with_override(std::env::var(API_URL_VAR).ok())
    }

    fn with_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using API URL from {}: {}", API_URL_VAR, url);
            self.base_url = url.trim().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_public_api() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://dummyjson.com");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_override_replaces_base_url() {
        let config =
            ApiConfig::default().with_override(Some(" http://localhost:3000 ".to_string()));
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let config = ApiConfig::default().with_override(Some("   ".to_string()));
        assert_eq!(config, ApiConfig::default());
        let config = ApiConfig::default().with_override(None);
        assert_eq!(config, ApiConfig::default());
    }
}
