//! LRU TTL Cache server
//!
//! Serves a bounded `String` cache over HTTP. Expired entries are swept in
//! the background between requests.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lru_ttl_cache::api::create_router;
use lru_ttl_cache::{spawn_purge_task, AppState, Config};

const DEFAULT_LOG_FILTER: &str = "lru_ttl_cache=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env();
    info!(?config, "starting LRU TTL cache server");

    let state = AppState::from_config(&config).context("invalid cache configuration")?;
    let purge = spawn_purge_task(
        state.cache.clone(),
        config.purge_period(),
        config.purge_batch,
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal(purge))
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the built-in filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves on Ctrl+C or SIGTERM, then stops the purge task.
async fn shutdown_signal(purge: JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(%err, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(%err, "cannot install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }

    purge.abort();
}
