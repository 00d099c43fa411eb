//! Listener and serve loop.

use crate::{AppState, ServerConfig, create_router};
use std::future::Future;
use taleweaver_error::{ServerError, ServerErrorKind, TaleweaverResult};
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Bind the configured address.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Bind`] if the address is unavailable.
#[instrument(skip(config), fields(address = %config.address()))]
pub async fn bind(config: &ServerConfig) -> TaleweaverResult<TcpListener> {
    let address = config.address();
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            address: address.clone(),
            reason: e.to_string(),
        })
    })?;
    Ok(listener)
}

/// Serve the API on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Serve`] if the server loop fails.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> TaleweaverResult<()> {
    let local = listener
        .local_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_default();
    info!(address = %local, "Taleweaver API listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Taleweaver API stopped");
    Ok(())
}

/// Bind the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if binding or serving fails.
pub async fn serve(config: &ServerConfig, state: AppState) -> TaleweaverResult<()> {
    let listener = bind(config).await?;
    serve_on(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
