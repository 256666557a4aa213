//! Authoritative session server for remote tic-tac-toe.
//!
//! Holds every match in a [`SessionStore`] and exposes it over a small REST
//! API built with axum. All move validation happens here; clients only ever
//! see snapshots produced by the store.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
mod config;
mod store;

pub use api::{ApiError, router};
pub use config::ServerConfig;
pub use store::{SessionStore, StoreError};
pub use tictac_core::ConfigError;

use std::future::Future;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Binds the configured address and serves until `shutdown` resolves.
#[instrument(skip(config, shutdown), fields(addr = %config.bind_addr()))]
pub async fn serve(
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    config.validate()?;
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let store = SessionStore::with_limit(*config.max_sessions());
    serve_on(listener, store, config.api_prefix(), shutdown).await
}

/// Serves the game API on an already bound listener.
#[instrument(skip(listener, store, shutdown))]
pub async fn serve_on(
    listener: TcpListener,
    store: SessionStore,
    api_prefix: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = router(store, api_prefix);
    let addr = listener.local_addr()?;
    info!(%addr, "Server ready at http://{}{}/games", addr, api_prefix);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
