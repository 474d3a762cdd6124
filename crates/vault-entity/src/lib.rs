//! # vault-entity
//!
//! Row models for the AssetVault tables. Every struct derives
//! `sqlx::FromRow` and maps one table one-to-one.

pub mod asset;
pub mod session;
pub mod user;

pub use asset::Asset;
pub use session::SessionRow;
pub use user::User;
