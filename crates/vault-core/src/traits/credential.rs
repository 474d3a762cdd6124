//! Password verification capability.

use crate::result::AppResult;

/// Checks a plaintext password against a stored hash.
///
/// Verification is CPU-bound; async callers should run it on a blocking
/// thread.
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Returns `Ok(false)` on mismatch and `Err` when the stored hash is
    /// unusable.
    fn verify(&self, hash: &str, password: &str) -> AppResult<bool>;

    /// Spend the work of one `verify` for a login that does not exist, so
    /// response time does not reveal whether the login is known.
    fn verify_absent(&self, _password: &str) {}
}
