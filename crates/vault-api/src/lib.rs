//! # vault-api
//!
//! HTTP API layer for AssetVault built on Axum.
//!
//! Provides the token and asset endpoints, the bearer-token extractor,
//! request logging, and the mapping from domain errors to HTTP responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{serve, shutdown_signal};
pub use state::AppState;
