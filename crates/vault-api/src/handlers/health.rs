//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// Answers 200 when the database responds and 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.assets.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };

    let (status, label) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            active_sessions: state.authority.active_sessions().await,
        }),
    )
}
