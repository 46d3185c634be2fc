use std::sync::Arc;

use tokio::net::TcpListener;

use shelf_store::{seed, BookStore, InMemoryBookStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Book catalogue server.
pub struct ShelfServer {
    config: ServerConfig,
    store: Arc<dyn BookStore>,
}

impl ShelfServer {
    /// Server over a fresh in-memory store, seeded when `config.seed` is set.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = Arc::new(InMemoryBookStore::new());
        if config.seed {
            seed(store.as_ref())?;
        }
        Ok(Self::with_store(config, store))
    }

    /// Server over an existing store. The store is used as-is.
    pub fn with_store(config: ServerConfig, store: Arc<dyn BookStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn BookStore> {
        &self.store
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(Arc::clone(&self.store)), &self.config)
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(books = self.store.len(), "Shelf server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
