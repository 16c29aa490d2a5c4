//! HTTP surface for pdfchat: one page, one upload route, one chat route.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod models;
pub mod state;
pub mod template;
pub mod upload;

use state::AppState;

/// Upload cap. PDFs beyond this are rejected with 413 by the body limit
/// layer before any handler work happens.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/upload", post(handlers::upload::upload))
        .route("/chat", post(handlers::chat::chat))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
