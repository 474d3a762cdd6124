//! Session repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_entity::SessionRow;

/// Repository for the `sessions` table.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every live session.
    pub async fn find_all_active(&self) -> AppResult<Vec<SessionRow>> {
        sqlx::query_as::<_, SessionRow>("SELECT * FROM sessions WHERE deleted_at IS NULL")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list active sessions", e)
            })
    }

    /// Retire the live session of `login` and insert a new one in one transaction.
    ///
    /// Concurrent replacements for the same login are serialized on a
    /// transaction-scoped advisory lock, so the later one retires the earlier
    /// row instead of colliding with it on the live-login index.
    pub async fn replace_active(
        &self,
        login: &str,
        token: &str,
        issued_at: i64,
        expires_at: i64,
    ) -> AppResult<SessionRow> {
        let db_err =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to store session", e);

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(login)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        sqlx::query(
            "UPDATE sessions SET deleted_at = NOW() WHERE login = $1 AND deleted_at IS NULL",
        )
        .bind(login)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let row = sqlx::query_as::<_, SessionRow>(
            "INSERT INTO sessions (id, login, token, issued_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(login)
        .bind(token)
        .bind(issued_at)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(row)
    }

    /// Soft-delete the live session of `login` if it has expired by the
    /// database clock. Returns the number of rows retired.
    ///
    /// A session re-issued after the caller observed expiry has a future
    /// `expires_at` and is left alone.
    pub async fn soft_delete_expired_by_login(&self, login: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET deleted_at = NOW() \
             WHERE login = $1 AND deleted_at IS NULL \
             AND expires_at < EXTRACT(EPOCH FROM NOW())::BIGINT",
        )
        .bind(login)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete session", e))?;
        Ok(result.rows_affected())
    }
}
