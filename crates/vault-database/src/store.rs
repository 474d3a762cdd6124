//! PostgreSQL-backed [`SessionStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use vault_core::result::AppResult;
use vault_core::traits::SessionStore;
use vault_core::types::SessionRecord;

use crate::repositories::{SessionRepository, UserRepository};

/// Session store over the `users` and `sessions` tables.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    users: UserRepository,
    sessions: SessionRepository,
}

impl PgSessionStore {
    /// Creates a store over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn get_password_hash(&self, login: &str) -> AppResult<Option<String>> {
        self.users.find_password_hash(login).await
    }

    async fn upsert_session(
        &self,
        login: &str,
        token: &str,
        issued_at: i64,
        expires_at: i64,
    ) -> AppResult<()> {
        let row = self
            .sessions
            .replace_active(login, token, issued_at, expires_at)
            .await?;
        debug!(login = %login, session_id = %row.id, "Session row written");
        Ok(())
    }

    /// Only an expired row is retired; the janitor is the sole caller and a
    /// newer row written by a concurrent re-issue must survive.
    async fn delete_session(&self, login: &str) -> AppResult<()> {
        let retired = self.sessions.soft_delete_expired_by_login(login).await?;
        debug!(login = %login, retired, "Session soft-deleted");
        Ok(())
    }

    async fn get_active_sessions(&self) -> AppResult<HashMap<String, SessionRecord>> {
        let rows = self.sessions.find_all_active().await?;
        Ok(rows.into_iter().map(|row| row.into_record()).collect())
    }
}
