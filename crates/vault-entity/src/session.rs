//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use vault_core::types::SessionRecord;

/// A row of the `sessions` table.
///
/// At most one row per login has `deleted_at IS NULL`; issuing a new token
/// soft-deletes the previous one in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionRow {
    /// Row identifier.
    pub id: Uuid,
    /// Owner of the session.
    pub login: String,
    /// Wire form of the issued token.
    #[serde(skip_serializing)]
    pub token: String,
    /// `iat` of the token, unix seconds.
    pub issued_at: i64,
    /// `exp` of the token, unix seconds.
    pub expires_at: i64,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
    /// When the session was retired (superseded or cleaned up).
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SessionRow {
    /// Convert into the record held by the in-memory session cache.
    pub fn into_record(self) -> (String, SessionRecord) {
        (self.login, SessionRecord::new(self.token, self.expires_at))
    }
}
