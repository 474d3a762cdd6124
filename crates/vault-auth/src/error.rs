//! Authentication error taxonomy.
//!
//! Every way a caller can fail to authenticate collapses into
//! [`AuthError::Failed`]. The precise [`AuthFailure`] travels alongside it so
//! it can be logged, but it is never part of the displayed message.

use thiserror::Error;

use vault_core::error::{AppError, ErrorKind};

use crate::token::ClaimViolation;

/// Internal reason an authentication attempt was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("unknown login")]
    UnknownLogin,
    #[error("wrong password")]
    WrongPassword,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token signature or algorithm rejected")]
    BadSignature,
    #[error("invalid claims: {0}")]
    InvalidClaims(ClaimViolation),
    #[error("token expired at {exp}, now {now}")]
    Expired { exp: i64, now: i64 },
    #[error("no active session for login")]
    NoSession,
    #[error("token superseded by a newer session")]
    Superseded,
}

impl AuthFailure {
    /// Short machine-readable tag for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownLogin => "unknown_login",
            Self::WrongPassword => "wrong_password",
            Self::Malformed(_) => "malformed",
            Self::BadSignature => "bad_signature",
            Self::InvalidClaims(_) => "invalid_claims",
            Self::Expired { .. } => "expired",
            Self::NoSession => "no_session",
            Self::Superseded => "superseded",
        }
    }
}

impl From<ClaimViolation> for AuthFailure {
    fn from(violation: ClaimViolation) -> Self {
        match violation {
            ClaimViolation::Expired { exp, now } => Self::Expired { exp, now },
            other => Self::InvalidClaims(other),
        }
    }
}

/// Error returned by [`TokenAuthority`](crate::TokenAuthority) operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The caller could not be authenticated. The cause is for logs only.
    #[error("authentication failed")]
    Failed { cause: AuthFailure },
    /// The session store failed or did not answer in time.
    #[error("session store unavailable")]
    StoreUnavailable {
        #[source]
        source: AppError,
    },
    /// Signing or hash-format fault.
    #[error("internal authentication error")]
    Internal(#[source] AppError),
}

impl AuthError {
    /// Wraps a failure cause.
    pub fn failed(cause: AuthFailure) -> Self {
        Self::Failed { cause }
    }

    /// The internal failure cause, if this is an authentication failure.
    pub fn failure(&self) -> Option<&AuthFailure> {
        match self {
            Self::Failed { cause } => Some(cause),
            _ => None,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Failed { .. } => AppError::new(ErrorKind::Authentication, "authentication failed"),
            AuthError::StoreUnavailable { source } => AppError::with_source(
                ErrorKind::ServiceUnavailable,
                "session store unavailable",
                source,
            ),
            AuthError::Internal(source) => source,
        }
    }
}
