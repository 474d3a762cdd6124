//! Configuration inspection commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use vault_core::config::database::mask_password;
use vault_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Load and validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            output::print_item(&config.redacted(), format);
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
                output::print_kv("Environment", &vault_core::config::environment());
                output::print_kv("Server", &config.server.bind_address());
                output::print_kv("Database", &mask_password(&config.database.url));
                output::print_kv("Token TTL", &format!("{}s", config.auth.token_ttl_seconds));
                output::print_kv(
                    "Cache cleanup",
                    &format!("every {}s", config.auth.cache_cleanup_interval_seconds),
                );
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }
    Ok(())
}
