//! HTTP API server for reelsync.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;
#[cfg(test)]
mod router_tests;

use axum::{Json, Router, routing::get, routing::post};
use std::sync::Arc;

use reelsync_service::{FilmService, Reconciler};

pub use response_types::{SyncStatusResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Catalog CRUD for user-authored films
    pub film_service: Arc<FilmService>,
    /// Shared with the scheduler so manual and timed runs never overlap
    pub reconciler: Arc<Reconciler>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/films", get(handlers::films::list_films).post(handlers::films::create_film))
        .route(
            "/api/films/{id}",
            get(handlers::films::get_film)
                .put(handlers::films::update_film)
                .delete(handlers::films::delete_film),
        )
        .route("/api/sync", post(handlers::sync::trigger_sync))
        .route("/api/sync/status", get(handlers::sync::sync_status))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
