//! HTTP request handlers, one module per resource.

pub mod asset;
pub mod auth;
pub mod health;
