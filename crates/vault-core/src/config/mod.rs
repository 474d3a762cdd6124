//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file, an optional environment overlay file, and
//! `ASSETVAULT__`-prefixed environment variables. Each sub-module represents
//! a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Prefix of environment variables that override file configuration.
pub const ENV_PREFIX: &str = "ASSETVAULT";

/// Variable naming the deployment environment whose overlay file is loaded.
pub const ENV_SELECTOR: &str = "ASSETVAULT_ENV";

/// Name of the current deployment environment, `development` when unset.
pub fn environment() -> String {
    std::env::var(ENV_SELECTOR).unwrap_or_else(|_| "development".to_string())
}

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[validate(nested)]
    pub database: DatabaseConfig,
    /// Token authority settings.
    #[validate(nested)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a base file, an environment overlay, and the
    /// process environment.
    ///
    /// `config_path` may point at a missing file; the overlay is read from
    /// `config/{env}.toml` when present. Environment variables use the
    /// `ASSETVAULT__SECTION__KEY` form, e.g. `ASSETVAULT__AUTH__HMAC_SECRET`.
    pub fn load(config_path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Returns a copy safe to print: secrets and the database password are masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.auth.hmac_secret = "****".to_string();
        copy.database.url = database::mask_password(&self.database.url);
        copy
    }
}
