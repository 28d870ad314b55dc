//! API Routes
//!
//! Configures the Axum router with all server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, serve_file_handler, serve_root_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Cache statistics
/// - `GET /` and `GET /*path` - Serve a file through the cache
///
/// /health and /stats shadow files of the same name under the root; the
/// wildcard route picks up everything else.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/", get(serve_root_handler))
        .route("/*path", get(serve_file_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
