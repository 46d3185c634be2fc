use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;
use crate::state::AppState;

/// Build the axum router with all book endpoints.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/Books", get(handler::list_books))
        .route("/Books/Index", get(handler::list_books))
        .route("/Books/Details", get(handler::book_details))
        .route("/Books/Details/:id", get(handler::book_details))
        .route("/Books/Create", post(handler::create_book))
        .route("/Books/Edit/:id", post(handler::edit_book))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
