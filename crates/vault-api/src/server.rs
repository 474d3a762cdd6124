//! HTTP server lifecycle: bind, serve, and stop on a termination signal.

use std::future::IntoFuture;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};

use vault_core::error::AppError;

use crate::router::build_router;
use crate::state::AppState;

/// Serve the API until SIGINT or SIGTERM, then drain in-flight requests for
/// at most `server.shutdown_grace_seconds`.
pub async fn serve(state: AppState) -> Result<(), AppError> {
    let addr = state.config.server.bind_address();
    let grace = Duration::from_secs(state.config.server.shutdown_grace_seconds);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(address = %addr, "AssetVault server listening");

    let (stopping_tx, mut stopping_rx) = watch::channel(false);
    let server = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            stopping_tx.send_replace(true);
        })
        .into_future();

    let grace_elapsed = async move {
        if stopping_rx.wait_for(|stopping| *stopping).await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result.map_err(|e| AppError::internal(format!("Server error: {e}"))),
        _ = grace_elapsed => {
            warn!(grace_secs = grace.as_secs(), "Shutdown grace period elapsed, dropping open connections");
            Ok(())
        }
    }
}

/// Resolve when the process receives Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
