//! # vault-core
//!
//! Core crate for AssetVault. Contains configuration schemas, the traits
//! implemented by the storage and auth crates, shared value types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other AssetVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
