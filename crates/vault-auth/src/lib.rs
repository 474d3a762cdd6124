//! # vault-auth
//!
//! Session and token authority for AssetVault.
//!
//! ## Modules
//!
//! - `token`: JWT minting and claim validation
//! - `password`: Argon2id password hashing and verification
//! - `session`: In-memory session cache and its cleanup janitor
//! - `authority`: [`TokenAuthority`], which issues and validates tokens

pub mod authority;
pub mod error;
pub mod password;
pub mod session;
pub mod token;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use authority::{AuthoritySettings, IssuedToken, TokenAuthority};
pub use error::{AuthError, AuthFailure};
pub use password::PasswordHasher;
pub use session::{CacheJanitor, SessionCache};
pub use token::{ClaimValidator, ClaimViolation, TokenCodec};
