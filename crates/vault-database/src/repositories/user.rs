//! User repository implementation.

use sqlx::PgPool;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_entity::User;

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch only the password hash of a user.
    pub async fn find_password_hash(&self, login: &str) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT pwd FROM users WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch password hash", e)
            })
    }

    /// Insert a new user. Fails with `Validation` if the login is taken.
    pub async fn create(&self, login: &str, pwd_hash: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (login, pwd) VALUES ($1, $2) \
             ON CONFLICT (login) DO NOTHING RETURNING *",
        )
        .bind(login)
        .bind(pwd_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create user", e))?
        .ok_or_else(|| AppError::validation(format!("User '{login}' already exists")))
    }

    /// Replace a user's password hash. Returns `false` if the user does not exist.
    pub async fn update_password(&self, login: &str, pwd_hash: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE users SET pwd = $2 WHERE login = $1")
            .bind(login)
            .bind(pwd_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update password", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// List all users ordered by login.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY login")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }
}
