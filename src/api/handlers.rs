//! API Handlers
//!
//! HTTP request handlers exposing the cache operations.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::LruCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ttl_from_secs, validate_key, DefaultTtlRequest, ExistsResponse, GetResponse, HealthResponse,
    KeyResponse, MessageResponse, PurgeRequest, PurgeResponse, ResizeRequest, ResizeResponse,
    SetRequest, SnapshotResponse, StatsResponse,
};

/// Cache type served over HTTP.
pub type SharedCache = LruCache<String, String>;

/// Application state shared across all handlers.
///
/// The cache does its own locking, so handlers share it through an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache
    pub cache: Arc<SharedCache>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: SharedCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The cache logs every removal at debug level.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = LruCache::builder(config.max_entries)
            .default_ttl(config.cache_default_ttl())
            .build()?;
        cache.subscribe(|key: &String, _value: &String, reason| {
            debug!(%key, %reason, "cache entry removed");
        });
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<KeyResponse>> {
    req.validate()?;
    let ttl = req.ttl()?;
    state.cache.set(req.key.clone(), req.value, ttl);

    Ok(Json(KeyResponse::stored(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    validate_key(&key)?;
    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /exists/:key
///
/// Checks for a live entry without touching recency or statistics.
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ExistsResponse>> {
    validate_key(&key)?;
    let exists = state.cache.contains_key(&key);
    Ok(Json(ExistsResponse { key, exists }))
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KeyResponse>> {
    validate_key(&key)?;
    if state.cache.remove(&key) {
        Ok(Json(KeyResponse::deleted(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.clear();
    Json(MessageResponse::new("Cache cleared"))
}

/// Handler for PUT /capacity
///
/// Resizes the cache, evicting least recently used entries when shrinking.
pub async fn resize_handler(
    State(state): State<AppState>,
    Json(req): Json<ResizeRequest>,
) -> Result<Json<ResizeResponse>> {
    state.cache.resize(req.capacity)?;
    Ok(Json(ResizeResponse {
        capacity: state.cache.capacity(),
        total_entries: state.cache.len(),
    }))
}

/// Handler for PUT /default-ttl
pub async fn default_ttl_handler(
    State(state): State<AppState>,
    Json(req): Json<DefaultTtlRequest>,
) -> Result<Json<MessageResponse>> {
    let ttl = ttl_from_secs(req.ttl)?;
    state.cache.set_default_ttl(ttl);

    let message = match req.ttl {
        Some(secs) => format!("Default TTL set to {}s", secs),
        None => "Default TTL disabled".to_string(),
    };
    Ok(Json(MessageResponse::new(message)))
}

/// Handler for POST /purge
///
/// Runs one bounded expiry scan from the least recently used end.
pub async fn purge_handler(
    State(state): State<AppState>,
    Json(req): Json<PurgeRequest>,
) -> Result<Json<PurgeResponse>> {
    if req.max_scan == 0 {
        return Err(CacheError::InvalidArgument(
            "max_scan must be greater than zero".to_string(),
        ));
    }
    let removed = state.cache.purge_expired(req.max_scan);
    Ok(Json(PurgeResponse { removed }))
}

/// Handler for GET /snapshot
///
/// Returns live entries, most recently used first.
pub async fn snapshot_handler(State(state): State<AppState>) -> Json<SnapshotResponse> {
    Json(SnapshotResponse::from(state.cache.snapshot()))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = &state.cache;
    Json(StatsResponse::new(cache.stats(), cache.len(), cache.capacity()))
}

/// Handler for POST /stats/reset
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.reset_stats();
    Json(MessageResponse::new("Statistics reset"))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
