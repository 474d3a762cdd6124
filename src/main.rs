//! AssetVault server.
//!
//! Wires configuration, the database, the token authority and the HTTP API
//! together and runs until a termination signal.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use vault_api::AppState;
use vault_auth::{AuthoritySettings, PasswordHasher, TokenAuthority};
use vault_core::config::{AppConfig, environment};
use vault_core::error::AppError;
use vault_core::traits::SystemClock;
use vault_database::repositories::asset::AssetRepository;
use vault_database::{DatabasePool, PgSessionStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("ASSETVAULT_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    AppConfig::load(&config_path, &environment())
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %environment(),
        "Starting AssetVault"
    );

    let db_pool = DatabasePool::connect(&config.database).await?;
    vault_database::migration::run_migrations(db_pool.pool()).await?;

    let authority = Arc::new(
        TokenAuthority::start(
            AuthoritySettings::from_config(&config.auth, &config.database),
            Arc::new(PgSessionStore::new(db_pool.pool().clone())),
            Arc::new(PasswordHasher::new()),
            Arc::new(SystemClock),
        )
        .await,
    );
    let assets = Arc::new(AssetRepository::new(db_pool.pool().clone()));

    let state = AppState::new(config, Arc::clone(&authority), assets);
    let served = vault_api::serve(state).await;

    tracing::info!("Stopping token authority");
    authority.shutdown().await;
    db_pool.close().await;

    served?;
    tracing::info!("AssetVault shut down gracefully");
    Ok(())
}
