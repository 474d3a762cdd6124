//! Core traits defined in `vault-core` and implemented by other crates.

pub mod asset_store;
pub mod clock;
pub mod credential;
pub mod session_store;

pub use asset_store::AssetStore;
pub use clock::{Clock, SystemClock};
pub use credential::CredentialVerifier;
pub use session_store::SessionStore;
