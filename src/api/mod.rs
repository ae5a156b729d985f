//! HTTP API server

use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::storage::TodoStore;

pub mod docs;
pub mod error;
pub mod handlers;
pub mod state;

pub use docs::ApiDoc;
pub use error::ApiError;
pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/:id",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .route("/api-docs", get(docs::swagger_ui))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience helper for a router over `store` with default settings
pub fn create_store_router(store: Arc<dyn TodoStore>) -> Router {
    create_router(AppState::new(store))
}
