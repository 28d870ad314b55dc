//! API Handlers
//!
//! HTTP request handlers for each server endpoint.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::{CacheEntry, CacheStore, CachedFetcher};
use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::fetch::FsFetcher;
use crate::models::{HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Filesystem fetcher wrapped with the read-through cache
    pub files: CachedFetcher<FsFetcher>,
    /// Retry directory requests with index.html appended
    pub index_redirect: bool,
}

impl AppState {
    /// Creates a new AppState around a wrapped fetcher.
    pub fn new(files: CachedFetcher<FsFetcher>, index_redirect: bool) -> Self {
        Self {
            files,
            index_redirect,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let fetcher = FsFetcher::new(config.root_dir.clone(), config.read_mode);
        let store = CacheStore::new(config.capacity);
        let files = CachedFetcher::new(fetcher, store, config.update);
        Self::new(files, config.index_redirect)
    }
}

/// Handler for GET /
///
/// The root always resolves to a directory, so with redirect enabled this
/// serves index.html.
pub async fn serve_root_handler(State(state): State<AppState>) -> Result<Response> {
    serve(&state, "").await
}

/// Handler for GET /*path
///
/// Serves the file at the request path through the read-through cache.
pub async fn serve_file_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response> {
    serve(&state, &path).await
}

async fn serve(state: &AppState, key: &str) -> Result<Response> {
    let entry = match state.files.lookup(key).await {
        Err(FetchError::IsDirectory(_)) if state.index_redirect => {
            let index_key = format!("{}/index.html", key.trim_end_matches('/'));
            state.files.lookup(&index_key).await?
        }
        result => result?,
    };
    Ok(content_response(entry))
}

fn content_response(entry: CacheEntry) -> Response {
    ([(header::CONTENT_TYPE, entry.content_type)], entry.payload).into_response()
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.files.store();
    let stats = store.read().await.stats();

    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
