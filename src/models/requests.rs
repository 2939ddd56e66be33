//! Request DTOs for the cache server API
//!
//! Bodies are validated before they reach the cache, so the handlers only
//! ever pass well-formed keys and non-zero TTLs through.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// PUT /set
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
    /// Seconds; overrides the cache default when present
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    pub fn validate(&self) -> Result<()> {
        validate_key(&self.key)?;
        if self.value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidArgument(format!(
                "Value exceeds maximum size of {MAX_VALUE_SIZE} bytes"
            )));
        }
        ttl_from_secs(self.ttl).map(drop)
    }

    /// The per-entry TTL, rejecting zero.
    pub fn ttl(&self) -> Result<Option<Duration>> {
        ttl_from_secs(self.ttl)
    }
}

/// Checks a key taken from a request path or body.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidArgument("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidArgument(format!(
            "Key exceeds maximum length of {MAX_KEY_LENGTH} bytes"
        )));
    }
    Ok(())
}

/// Converts a wire TTL in seconds. Zero is rejected; absence means "none".
pub fn ttl_from_secs(ttl: Option<u64>) -> Result<Option<Duration>> {
    match ttl {
        Some(0) => Err(CacheError::InvalidArgument(
            "TTL must be greater than zero".to_string(),
        )),
        ttl => Ok(ttl.map(Duration::from_secs)),
    }
}

/// PUT /capacity
#[derive(Debug, Clone, Deserialize)]
pub struct ResizeRequest {
    pub capacity: usize,
}

/// PUT /default-ttl. A missing or null `ttl` disables the default.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultTtlRequest {
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// POST /purge
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeRequest {
    /// Upper bound on entries inspected, starting from the least recent
    pub max_scan: usize,
}
