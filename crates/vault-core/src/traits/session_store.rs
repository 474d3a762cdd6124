//! Durable session store consumed by the token authority.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::SessionRecord;

/// Durable backing for user credentials and active sessions.
///
/// Implementations must keep at most one active session per login.
/// Every method may fail with a `Database` or `Timeout` error when the
/// backend is unreachable; callers treat those as "store unavailable".
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look up the stored password hash for `login`.
    ///
    /// Returns `Ok(None)` when the login does not exist.
    async fn get_password_hash(&self, login: &str) -> AppResult<Option<String>>;

    /// Atomically retire any active session of `login` and record a new one.
    async fn upsert_session(
        &self,
        login: &str,
        token: &str,
        issued_at: i64,
        expires_at: i64,
    ) -> AppResult<()>;

    /// Soft-delete the active session of `login`. Deleting a login without an
    /// active session succeeds.
    ///
    /// Called by the cache janitor for sessions it saw expire. A durable
    /// implementation may keep a row that has not expired yet, which is the
    /// case when the login was re-issued after the janitor looked.
    async fn delete_session(&self, login: &str) -> AppResult<()>;

    /// Every currently active session keyed by login.
    async fn get_active_sessions(&self) -> AppResult<HashMap<String, SessionRecord>>;
}
