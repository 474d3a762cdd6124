//! Path parameter helpers.

use vault_core::error::AppError;
use vault_core::types::is_valid_asset_name;

/// Accept an asset name only if it is non-empty ASCII alphanumeric.
pub fn parse_asset_name(name: &str) -> Result<&str, AppError> {
    if is_valid_asset_name(name) {
        Ok(name)
    } else {
        Err(AppError::validation(format!("Invalid asset name: {name}")))
    }
}
