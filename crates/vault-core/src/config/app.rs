//! HTTP server configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,
    /// Bind port. Privileged ports are refused.
    #[serde(default = "default_port")]
    #[validate(range(min = 1025))]
    pub port: u16,
    /// Time allowed to read a request's headers and body, in milliseconds.
    #[serde(default = "default_read_timeout")]
    #[validate(range(min = 100, max = 60_000))]
    pub read_timeout_ms: u64,
    /// Total time budget for handling one request, in seconds.
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1, max = 60))]
    pub request_timeout_seconds: u64,
    /// Graceful shutdown timeout in seconds.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_body")]
    #[validate(range(min = 1))]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Per-request time budget.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Request read budget.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            read_timeout_ms: default_read_timeout(),
            request_timeout_seconds: default_request_timeout(),
            shutdown_grace_seconds: default_shutdown_grace(),
            max_body_bytes: default_max_body(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_read_timeout() -> u64 {
    500
}

fn default_request_timeout() -> u64 {
    1
}

fn default_shutdown_grace() -> u64 {
    10
}

fn default_max_body() -> usize {
    10 * 1024 * 1024
}
