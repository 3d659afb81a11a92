//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Longest token lifetime the gateway will issue (one year)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing key for bearer tokens
    pub token_secret: Vec<u8>,
    /// Lifetime of an issued token (24 hours)
    pub token_ttl: Duration,
    /// Clock skew tolerated when checking `exp`
    pub token_leeway: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; 32],
            token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            token_leeway: Duration::ZERO,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing key (tokens die with the process)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development (tolerates container clock drift)
    pub fn development() -> Self {
        Self {
            token_leeway: Duration::from_secs(60),
            ..Self::with_random_secret()
        }
    }

    /// Get token TTL in seconds, capped at [`MAX_TOKEN_TTL`]
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.min(MAX_TOKEN_TTL).as_secs()).unwrap_or(i64::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
