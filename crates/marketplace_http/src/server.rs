//! Server bootstrap: open the store, bind, serve until Ctrl-C.

use crate::config::ServerConfig;
use crate::routes::{cors_layer, router};
use crate::state::AppState;
use log::{info, warn};
use marketplace_core::{open_repository, ImageStore, RepoError};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to open item store: {0}")]
    Store(#[from] RepoError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs the HTTP server until a shutdown signal arrives.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let repo = open_repository(&config.storage)?;
    let state = AppState::new(repo, ImageStore::new(config.image_dir.clone()));
    let app = router(state, cors_layer(config.front_url.clone()));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    info!(
        "event=http_listen module=http status=ok addr={} backend={} image_dir={}",
        config.bind_addr,
        config.storage.label(),
        config.image_dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=http_shutdown module=http status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=signal_listen module=http status=error error={err}");
        std::future::pending::<()>().await;
    }
}
