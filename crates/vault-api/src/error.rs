//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use vault_auth::AuthError;
use vault_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Error returned by handlers and extractors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, code, message) = match err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.message),
            ErrorKind::Authentication => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "authentication failed".to_string(),
            ),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.message),
            ErrorKind::ServiceUnavailable | ErrorKind::Timeout => {
                error!(error = %err, source = ?std::error::Error::source(&err), "Backend unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "service temporarily unavailable".to_string(),
                )
            }
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => {
                error!(error = %err, source = ?std::error::Error::source(&err), "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error".to_string(),
                )
            }
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
