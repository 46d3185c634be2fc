use std::sync::Arc;

use axum::Router;

use shelf_server::{build_router, AppState, ServerConfig};
use shelf_store::{seed, InMemoryBookStore};

use crate::client::TestClient;

/// In-process host for the book catalogue.
///
/// Requests go straight into the router; no socket is opened. Each
/// `TestServer` owns its own store, so tests that build their own host never
/// see each other's writes. Clone a host to share it: clones drive the same
/// router and store.
#[derive(Clone)]
pub struct TestServer {
    router: Router,
    store: Arc<InMemoryBookStore>,
}

impl TestServer {
    /// Host over a freshly seeded store.
    pub fn new() -> Self {
        let store = Arc::new(InMemoryBookStore::new());
        seed(store.as_ref()).expect("seed titles are valid book names");
        Self::with_store(store)
    }

    /// Host over an empty store.
    pub fn empty() -> Self {
        Self::with_store(Arc::new(InMemoryBookStore::new()))
    }

    /// Host over an existing store, with default server settings.
    pub fn with_store(store: Arc<InMemoryBookStore>) -> Self {
        Self::with_config(ServerConfig::default(), store)
    }

    pub fn with_config(config: ServerConfig, store: Arc<InMemoryBookStore>) -> Self {
        let router = build_router(AppState::new(store.clone()), &config);
        Self { router, store }
    }

    /// The backing store, for direct inspection.
    pub fn store(&self) -> &Arc<InMemoryBookStore> {
        &self.store
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn client(&self) -> TestClient {
        TestClient::new(self.router.clone())
    }
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TestServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestServer")
            .field("store", &self.store)
            .finish()
    }
}
