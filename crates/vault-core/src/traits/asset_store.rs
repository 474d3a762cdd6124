//! Per-user asset storage.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::AssetContent;

/// Storage for named per-user assets.
#[async_trait]
pub trait AssetStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a live asset owned by `login`.
    async fn get_asset(&self, login: &str, asset_name: &str) -> AppResult<Option<AssetContent>>;

    /// Create or replace an asset. Replacing a deleted asset revives it.
    async fn put_asset(
        &self,
        login: &str,
        asset_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<()>;

    /// Soft-delete an asset. Returns `false` if there was nothing to delete.
    async fn delete_asset(&self, login: &str, asset_name: &str) -> AppResult<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
