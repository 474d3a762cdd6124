//! `AuthUser` extractor: validates the bearer token and yields its login.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use vault_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The login behind a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub login: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            debug!(path = %parts.uri.path(), "Missing or malformed bearer authorization");
            AppError::authentication("Missing bearer token")
        })?;

        let login = state.authority.validate_token(token).await?;
        Ok(Self { login })
    }
}

/// Extract `<token>` from `Authorization: Bearer <token>`. The scheme is
/// matched case-insensitively.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
