//! Response DTOs for the cache server API
//!
//! Every body is JSON; errors use [`ErrorResponse`].

use serde::Serialize;

use crate::cache::CacheStats;

/// GET /get/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: String,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Acknowledges a write or delete of a single key (PUT /set, DELETE /del/:key).
#[derive(Debug, Clone, Serialize)]
pub struct KeyResponse {
    pub message: String,
    pub key: String,
}

impl KeyResponse {
    pub fn stored(key: impl Into<String>) -> Self {
        Self::with_action(key.into(), "stored")
    }

    pub fn deleted(key: impl Into<String>) -> Self {
        Self::with_action(key.into(), "deleted")
    }

    fn with_action(key: String, action: &str) -> Self {
        Self {
            message: format!("Key '{key}' {action}"),
            key,
        }
    }
}

/// GET /exists/:key
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub key: String,
    pub exists: bool,
}

/// Plain acknowledgement for operations with nothing else to report.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// PUT /capacity: the capacity now in force and how many entries survived.
#[derive(Debug, Clone, Serialize)]
pub struct ResizeResponse {
    pub capacity: usize,
    pub total_entries: usize,
}

/// POST /purge
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEntry {
    pub key: String,
    pub value: String,
}

/// GET /snapshot: live entries, most recently used first.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    pub entries: Vec<SnapshotEntry>,
}

impl From<Vec<(String, String)>> for SnapshotResponse {
    fn from(entries: Vec<(String, String)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| SnapshotEntry { key, value })
                .collect(),
        }
    }
}

/// GET /stats: the cache counters flattened together with occupancy.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub counters: CacheStats,
    pub total_entries: usize,
    pub capacity: usize,
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(counters: CacheStats, total_entries: usize, capacity: usize) -> Self {
        Self {
            hit_rate: counters.hit_rate(),
            counters,
            total_entries,
            capacity,
        }
    }
}

/// GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339, UTC
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
