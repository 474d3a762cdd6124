//! Convenience result type alias for AssetVault.

use crate::error::AppError;

/// A specialized `Result` type for AssetVault operations.
pub type AppResult<T> = Result<T, AppError>;
