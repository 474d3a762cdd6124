//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::CredentialVerifier;

/// Well-formed Argon2id hash with default parameters that no password matches.
pub const ABSENT_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hashes and verifies passwords using Argon2id with default parameters.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a random salt into PHC string form.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch and an error when the stored hash
    /// cannot be parsed.
    pub fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

impl CredentialVerifier for PasswordHasher {
    fn verify(&self, hash: &str, password: &str) -> AppResult<bool> {
        self.verify_password(password, hash)
    }

    fn verify_absent(&self, password: &str) {
        let _ = self.verify_password(password, ABSENT_USER_HASH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("not-a-phc-string", "x").is_err());
        assert!(hasher.verify(&hash, "correct horse").unwrap());
        assert!(!hasher.verify(&hash, "battery staple").unwrap());
    }

    #[test]
    fn test_absent_user_hash_parses_and_never_matches() {
        let hasher = PasswordHasher::new();
        assert!(PasswordHash::new(ABSENT_USER_HASH).is_ok());
        assert!(!hasher.verify(ABSENT_USER_HASH, "").unwrap());
        assert!(!hasher.verify(ABSENT_USER_HASH, "wonderland").unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("pw").unwrap();
        let b = hasher.hash_password("pw").unwrap();
        assert_ne!(a, b);
    }
}
