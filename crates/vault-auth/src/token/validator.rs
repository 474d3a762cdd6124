//! Ordered claim checks applied after the signature is verified.

use thiserror::Error;

use super::claims::RawClaims;

/// The first claim check a token failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimViolation {
    #[error("login claim missing or empty")]
    MissingLogin,
    #[error("iat claim missing or not positive")]
    InvalidIssuedAt,
    #[error("exp claim missing or not positive")]
    InvalidExpiry,
    #[error("iat {iat} is not before exp {exp}")]
    IssuedAfterExpiry { iat: i64, exp: i64 },
    #[error("lifetime {lifetime}s differs from configured {expected}s")]
    LifetimeMismatch { lifetime: i64, expected: i64 },
    #[error("expired at {exp}, now {now}")]
    Expired { exp: i64, now: i64 },
}

/// Claims that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidClaims {
    pub login: String,
    pub iat: i64,
    pub exp: i64,
}

/// Stateless validator for token claims against a fixed TTL.
#[derive(Debug, Clone, Copy)]
pub struct ClaimValidator {
    ttl_seconds: i64,
}

impl ClaimValidator {
    /// Validator expecting `exp - iat` to equal `ttl_seconds`.
    pub fn new(ttl_seconds: i64) -> Self {
        Self { ttl_seconds }
    }

    /// Run the checks in order and stop at the first violation.
    ///
    /// A token is still valid during the second named by its `exp`.
    pub fn validate(&self, claims: &RawClaims, now: i64) -> Result<ValidClaims, ClaimViolation> {
        let login = match claims.login.as_deref() {
            Some(login) if !login.is_empty() => login,
            _ => return Err(ClaimViolation::MissingLogin),
        };
        let iat = match claims.iat {
            Some(iat) if iat >= 1 => iat,
            _ => return Err(ClaimViolation::InvalidIssuedAt),
        };
        let exp = match claims.exp {
            Some(exp) if exp >= 1 => exp,
            _ => return Err(ClaimViolation::InvalidExpiry),
        };
        if iat >= exp {
            return Err(ClaimViolation::IssuedAfterExpiry { iat, exp });
        }
        let lifetime = exp - iat;
        if lifetime != self.ttl_seconds {
            return Err(ClaimViolation::LifetimeMismatch {
                lifetime,
                expected: self.ttl_seconds,
            });
        }
        if exp < now {
            return Err(ClaimViolation::Expired { exp, now });
        }

        Ok(ValidClaims {
            login: login.to_string(),
            iat,
            exp,
        })
    }
}
