//! Logging configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level: `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default = "default_level")]
    #[validate(custom(function = "validate_level"))]
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    #[validate(custom(function = "validate_format"))]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn validate_level(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("log_level")),
    }
}

fn validate_format(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "json" | "pretty" => Ok(()),
        _ => Err(validator::ValidationError::new("log_format")),
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "json".to_string()
}
