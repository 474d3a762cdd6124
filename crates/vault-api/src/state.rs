//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use vault_auth::TokenAuthority;
use vault_core::config::AppConfig;
use vault_core::traits::AssetStore;

/// Shared dependencies, passed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issuance and validation
    pub authority: Arc<TokenAuthority>,
    /// Per-user asset storage
    pub assets: Arc<dyn AssetStore>,
}

impl AppState {
    /// Builds the shared state handed to every handler.
    pub fn new(
        config: AppConfig,
        authority: Arc<TokenAuthority>,
        assets: Arc<dyn AssetStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            authority,
            assets,
        }
    }
}
