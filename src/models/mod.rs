//! Request and Response models for the cache server API
//!
//! JSON bodies for the HTTP surface. Keys and values are strings and TTLs
//! travel as whole seconds.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    ttl_from_secs, validate_key, DefaultTtlRequest, PurgeRequest, ResizeRequest, SetRequest,
    MAX_KEY_LENGTH, MAX_VALUE_SIZE,
};
pub use responses::{
    ErrorResponse, ExistsResponse, GetResponse, HealthResponse, KeyResponse, MessageResponse,
    PurgeResponse, ResizeResponse, SnapshotEntry, SnapshotResponse, StatsResponse,
};
