//! # vault-database
//!
//! PostgreSQL connection management, embedded migrations, and the
//! repositories behind the core [`SessionStore`](vault_core::traits::SessionStore)
//! and [`AssetStore`](vault_core::traits::AssetStore) traits.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::PgSessionStore;
