//! Asset handlers: fetch, store, and delete a user's named assets.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::info;

use vault_core::error::AppError;
use vault_core::types::asset::{JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};

use crate::dto::StatusResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_asset_name};
use crate::state::AppState;

const TEXT_RESPONSE_TYPE: &str = "application/text; charset=utf-8";
const JSON_RESPONSE_TYPE: &str = "application/json; charset=utf-8";

/// GET /asset/{asset_name}
pub async fn get_asset(
    State(state): State<AppState>,
    user: AuthUser,
    Path(asset_name): Path<String>,
) -> Result<Response, ApiError> {
    let name = parse_asset_name(&asset_name)?;
    let asset = state
        .assets
        .get_asset(&user.login, name)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Asset '{name}' not found")))?;

    let content_type = if asset.is_text() {
        TEXT_RESPONSE_TYPE
    } else {
        JSON_RESPONSE_TYPE
    };
    Ok(([(CONTENT_TYPE, content_type)], asset.data).into_response())
}

/// POST /asset/{asset_name}
///
/// Stores the request body under the caller's login, replacing any previous
/// version.
pub async fn put_asset(
    State(state): State<AppState>,
    user: AuthUser,
    Path(asset_name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError> {
    let name = parse_asset_name(&asset_name)?;
    let content_type = stored_content_type(&headers);
    let size = body.len();

    state
        .assets
        .put_asset(&user.login, name, content_type, body)
        .await?;

    info!(login = %user.login, asset = %name, content_type, size, "Asset stored");
    Ok(Json(StatusResponse::ok()))
}

/// DELETE /asset/{asset_name}
pub async fn delete_asset(
    State(state): State<AppState>,
    user: AuthUser,
    Path(asset_name): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let name = parse_asset_name(&asset_name)?;
    if !state.assets.delete_asset(&user.login, name).await? {
        return Err(AppError::not_found(format!("Asset '{name}' not found")).into());
    }

    info!(login = %user.login, asset = %name, "Asset deleted");
    Ok(Json(StatusResponse::ok()))
}

/// Plain text bodies are stored as text; everything else as JSON.
fn stored_content_type(headers: &HeaderMap) -> &'static str {
    let mime = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    if mime.eq_ignore_ascii_case(TEXT_CONTENT_TYPE) || mime.eq_ignore_ascii_case("text/plain") {
        TEXT_CONTENT_TYPE
    } else {
        JSON_CONTENT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_stored_content_type() {
        assert_eq!(stored_content_type(&headers(Some("application/text"))), TEXT_CONTENT_TYPE);
        assert_eq!(
            stored_content_type(&headers(Some("text/plain; charset=utf-8"))),
            TEXT_CONTENT_TYPE
        );
        assert_eq!(stored_content_type(&headers(Some("application/json"))), JSON_CONTENT_TYPE);
        assert_eq!(stored_content_type(&headers(None)), JSON_CONTENT_TYPE);
    }
}
