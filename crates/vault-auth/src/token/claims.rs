//! JWT claim payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims written into every token this service mints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Login the token was issued to.
    pub login: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Per-issue identifier, so two tokens minted in the same second differ.
    pub jti: Uuid,
}

impl Claims {
    /// Claims for a freshly issued token with a new `jti`.
    pub fn new(login: impl Into<String>, iat: i64, exp: i64) -> Self {
        Self {
            login: login.into(),
            iat,
            exp,
            jti: Uuid::new_v4(),
        }
    }
}

/// Claims as found in a presented token.
///
/// Every field is optional so that a token missing a claim decodes
/// successfully and is rejected by [`ClaimValidator`](super::ClaimValidator)
/// with a precise violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawClaims {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}
