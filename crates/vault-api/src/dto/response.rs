//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /auth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token to present on asset requests.
    pub access_token: String,
    /// Token expiry as unix seconds.
    pub expires_in: i64,
    /// Always `"Bearer"`.
    pub token_type: String,
}

/// Acknowledgement for mutating asset requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    /// Success response with status `ok`.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether the asset store answered its ping.
    pub database: bool,
    /// Sessions held in the token cache.
    pub active_sessions: usize,
}
