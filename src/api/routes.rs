//! API Routes
//!
//! Key-level routes and cache administration routes are assembled
//! separately and merged under one CORS and tracing stack.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, default_ttl_handler, delete_handler, exists_handler, get_handler,
    health_handler, purge_handler, reset_stats_handler, resize_handler, set_handler,
    snapshot_handler, stats_handler, AppState,
};

/// Builds the full router.
///
/// # Endpoints
/// - `PUT /set`, `GET /get/:key`, `GET /exists/:key`, `DELETE /del/:key`
/// - `POST /clear`, `PUT /capacity`, `PUT /default-ttl`, `POST /purge`
/// - `GET /snapshot`, `GET /stats`, `POST /stats/reset`
/// - `GET /health`
///
/// CORS is fully permissive; restrict it before exposing the server.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(key_routes())
        .merge(admin_routes())
        .route("/health", get(health_handler))
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Single-entry reads and writes.
fn key_routes() -> Router<AppState> {
    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/exists/:key", get(exists_handler))
        .route("/del/:key", delete(delete_handler))
}

/// Whole-cache operations: sizing, expiry, introspection.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/clear", post(clear_handler))
        .route("/capacity", put(resize_handler))
        .route("/default-ttl", put(default_ttl_handler))
        .route("/purge", post(purge_handler))
        .route("/snapshot", get(snapshot_handler))
        .route("/stats", get(stats_handler))
        .route("/stats/reset", post(reset_stats_handler))
}

fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
