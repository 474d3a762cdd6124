//! Token authority configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Token issuance and session cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthConfig {
    /// Shared HMAC-SHA256 secret used to sign and verify tokens.
    #[validate(length(min = 6, max = 32), custom(function = "validate_alphanumeric"))]
    pub hmac_secret: String,
    /// Token time-to-live in seconds. Enforced at mint and at validation.
    #[serde(default = "default_token_ttl")]
    #[validate(range(min = 1, max = 3600))]
    pub token_ttl_seconds: u64,
    /// Interval between session cache cleanup runs, in seconds.
    #[serde(default = "default_cleanup_interval")]
    #[validate(range(min = 1, max = 86_400))]
    pub cache_cleanup_interval_seconds: u64,
}

impl AuthConfig {
    /// Configured token lifetime.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds)
    }

    /// Configured janitor tick interval.
    pub fn cache_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cache_cleanup_interval_seconds)
    }
}

fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_cleanup_interval() -> u64 {
    86_400
}
