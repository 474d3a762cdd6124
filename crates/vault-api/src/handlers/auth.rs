//! Token issuance handler.

use axum::Json;
use axum::extract::State;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Basic;
use axum_extra::typed_header::TypedHeaderRejection;
use tracing::debug;

use vault_core::error::AppError;

use crate::dto::TokenResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /auth
///
/// Exchanges HTTP Basic credentials for a bearer token.
pub async fn issue_token(
    State(state): State<AppState>,
    credentials: Result<TypedHeader<Authorization<Basic>>, TypedHeaderRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let TypedHeader(Authorization(basic)) = credentials.map_err(|e| {
        debug!(error = %e, "Rejected token request without Basic credentials");
        AppError::validation("Basic authorization required")
    })?;

    let issued = state
        .authority
        .get_token(basic.username(), basic.password())
        .await?;

    Ok(Json(TokenResponse {
        access_token: issued.token,
        expires_in: issued.expires_at,
        token_type: "Bearer".to_string(),
    }))
}
