use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use digest_indexer::{HashIndex, IndexStats, ProjectIndexer};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::routes;

/// Per-request state: the index built at startup, read-only from here on.
#[derive(Clone)]
pub struct AppState {
    pub(crate) index: Arc<HashIndex>,
}

impl AppState {
    pub fn new(index: Arc<HashIndex>) -> Self {
        Self { index }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::lookup))
        .route("/download", get(routes::download))
        .with_state(state)
}

/// Scan the configured root once. Runs on a blocking thread; fails if the root is unusable.
pub async fn build_index(config: &ServerConfig) -> Result<(Arc<HashIndex>, IndexStats)> {
    let indexer = ProjectIndexer::new(config.indexer_config())
        .with_context(|| format!("cannot index {}", config.root.display()))?;

    let (index, stats) = tokio::task::spawn_blocking(move || indexer.build())
        .await
        .context("indexing task panicked")??;

    Ok((Arc::new(index), stats))
}

async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.bind_addr()?;
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))
}

/// Build the index, then serve until `shutdown` resolves.
pub async fn run<F>(config: ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (index, _) = build_index(&config).await?;
    let listener = bind(&config).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(index)))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    log::info!("Server stopped");
    Ok(())
}

/// A server running on a background task, stopped on `shutdown` or drop.
pub struct Server {
    addr: SocketAddr,
    stats: IndexStats,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    pub async fn start(config: ServerConfig) -> Result<Self> {
        let (index, stats) = build_index(&config).await?;
        let listener = bind(&config).await?;
        let addr = listener.local_addr()?;
        log::info!("Listening on http://{addr}");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = router(AppState::new(index));
        tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(err) = result {
                log::error!("Server error: {err}");
            }
        });

        Ok(Self {
            addr,
            stats,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn shutdown(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.shutdown();
    }
}
