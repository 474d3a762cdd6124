//! Route definitions for the AssetVault HTTP API.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(RequestBodyTimeoutLayer::new(server.read_timeout()))
        .layer(DefaultBodyLimit::max(server.max_body_bytes));

    Router::new()
        .merge(auth_routes())
        .merge(asset_routes())
        .route("/health", get(handlers::health::health))
        .layer(layers)
        .with_state(state)
}

/// Token issuance
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth", post(handlers::auth::issue_token))
}

/// Per-user assets, all bearer-protected
fn asset_routes() -> Router<AppState> {
    Router::new().route(
        "/asset/{asset_name}",
        get(handlers::asset::get_asset)
            .post(handlers::asset::put_asset)
            .delete(handlers::asset::delete_asset),
    )
}
