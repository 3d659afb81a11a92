//! Storefront Configuration

use std::path::PathBuf;
use std::time::Duration;

/// Where the gateway lives and where the session is kept.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Gateway origin, no trailing slash (e.g. `http://localhost:31113`)
    pub api_base_url: String,
    /// Per-request timeout (10 seconds)
    pub request_timeout: Duration,
    /// Directory for [`crate::storage::FileStorage`]
    pub storage_dir: PathBuf,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:31113".to_string(),
            request_timeout: Duration::from_secs(10),
            storage_dir: PathBuf::from(".unishop"),
        }
    }
}

impl StorefrontConfig {
    /// Point at a different gateway, keeping everything else.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Create config for development (slow local builds, throwaway session)
    pub fn development() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            storage_dir: std::env::temp_dir().join("unishop-dev"),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_trims_slash() {
        let config = StorefrontConfig::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
