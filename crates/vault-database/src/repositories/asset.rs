//! Asset repository implementation.

use async_trait::async_trait;
use bytes::Bytes;
use sqlx::PgPool;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::traits::AssetStore;
use vault_core::types::AssetContent;
use vault_entity::Asset;

/// Repository for the `files` table.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    /// Create a new asset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a live asset.
    pub async fn find(&self, login: &str, asset_name: &str) -> AppResult<Option<Asset>> {
        sqlx::query_as::<_, Asset>(
            "SELECT * FROM files WHERE asset_id = $1 AND user_login = $2 AND deleted_at IS NULL",
        )
        .bind(asset_name)
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find asset", e))
    }

    /// Insert or overwrite an asset, reviving it if it was deleted.
    pub async fn upsert(
        &self,
        login: &str,
        asset_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO files (asset_id, user_login, content_type, data) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (asset_id, user_login) DO UPDATE SET \
             content_type = EXCLUDED.content_type, data = EXCLUDED.data, \
             updated_at = NOW(), deleted_at = NULL",
        )
        .bind(asset_name)
        .bind(login)
        .bind(content_type)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store asset", e))?;
        Ok(())
    }

    /// Soft-delete a live asset. Returns `false` if none matched.
    pub async fn soft_delete(&self, login: &str, asset_name: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE files SET deleted_at = NOW(), updated_at = NOW() \
             WHERE asset_id = $1 AND user_login = $2 AND deleted_at IS NULL",
        )
        .bind(asset_name)
        .bind(login)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete asset", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AssetStore for AssetRepository {
    async fn get_asset(&self, login: &str, asset_name: &str) -> AppResult<Option<AssetContent>> {
        Ok(self.find(login, asset_name).await?.map(AssetContent::from))
    }

    async fn put_asset(
        &self,
        login: &str,
        asset_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<()> {
        self.upsert(login, asset_name, content_type, &data).await
    }

    async fn delete_asset(&self, login: &str, asset_name: &str) -> AppResult<bool> {
        self.soft_delete(login, asset_name).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        crate::connection::ping(&self.pool).await
    }
}
