//! Cache Entry Module
//!
//! A stored key/value pair and its absolute expiry.

use std::time::{Duration, Instant};

// == Cache Entry ==
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// Lookup identity, fixed for the life of the entry
    pub key: K,
    pub value: V,
    /// None = no expiration
    pub expires_at: Option<Instant>,
}

impl<K, V> CacheEntry<K, V> {
    pub fn new(key: K, value: V, expires_at: Option<Instant>) -> Self {
        Self {
            key,
            value,
            expires_at,
        }
    }

    /// An entry is expired once `now` reaches its expiry instant.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires| now >= expires)
    }
}

/// Converts an optional TTL into an absolute expiry.
///
/// A TTL too large to represent is treated as never expiring.
pub fn expiry_from(ttl: Option<Duration>, now: Instant) -> Option<Instant> {
    ttl.and_then(|ttl| now.checked_add(ttl))
}
