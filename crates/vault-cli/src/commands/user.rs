//! User management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use vault_auth::PasswordHasher;
use vault_core::error::AppError;
use vault_database::repositories::UserRepository;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Login name
        login: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Replace a user's password
    SetPassword {
        /// Login name
        login: String,
        /// New password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// List all users
    List,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    login: String,
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let users = UserRepository::new(pool.pool().clone());
    let hasher = PasswordHasher::new();

    match &args.command {
        UserCommand::Create { login, password } => {
            if login.trim().is_empty() || login.contains(':') {
                return Err(AppError::validation(
                    "Login must be non-empty and must not contain ':'",
                ));
            }
            let password = resolve_password(password.as_deref())?;
            let hash = hasher.hash_password(&password)?;
            users.create(login, &hash).await?;
            output::print_success(&format!("User '{login}' created"));
        }
        UserCommand::SetPassword { login, password } => {
            let password = resolve_password(password.as_deref())?;
            let hash = hasher.hash_password(&password)?;
            if !users.update_password(login, &hash).await? {
                return Err(AppError::not_found(format!("User '{login}' not found")));
            }
            output::print_success(&format!("Password for '{login}' updated"));
        }
        UserCommand::List => {
            let rows: Vec<UserRow> = users
                .list()
                .await?
                .into_iter()
                .map(|u| UserRow {
                    login: u.login,
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    pool.close().await;
    Ok(())
}

/// Use the password given on the command line or prompt for one twice.
fn resolve_password(given: Option<&str>) -> Result<String, AppError> {
    let password = match given {
        Some(password) => password.to_string(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }
    Ok(password)
}
