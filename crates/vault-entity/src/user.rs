//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique login name.
    pub login: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub pwd: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
