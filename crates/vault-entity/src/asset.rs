//! Asset entity model.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use vault_core::types::AssetContent;

/// A row of the `files` table. Assets are keyed by `(asset_id, user_login)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Asset {
    /// Asset name, unique per user.
    pub asset_id: String,
    /// Owning login.
    pub user_login: String,
    /// Declared media type of `data`.
    pub content_type: String,
    /// Raw asset body.
    #[serde(skip)]
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the asset is soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Asset> for AssetContent {
    fn from(asset: Asset) -> Self {
        Self {
            content_type: asset.content_type,
            data: Bytes::from(asset.data),
        }
    }
}
