//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use vault_core::config::AppConfig;
use vault_core::error::AppError;
use vault_database::DatabasePool;

/// AssetVault administration
#[derive(Debug, Parser)]
#[command(name = "assetvault", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format),
        }
    }
}

/// Load configuration for the current `ASSETVAULT_ENV`.
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path, &vault_core::config::environment())
}

/// Connect to the configured database.
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
