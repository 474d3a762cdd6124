//! In-memory view of active sessions and its periodic cleanup.

pub mod cache;
pub mod janitor;

pub use cache::SessionCache;
pub use janitor::{CacheJanitor, SweepReport};
