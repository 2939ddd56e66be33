//! Cache Statistics Module
//!
//! Lookup and removal counters. Explicit removals and clears are not
//! counted; only policy-driven removals are.

use serde::Serialize;

use crate::cache::EvictionReason;

/// Snapshot-able counters, reset only by [`CacheStats::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing, or found an expired entry
    pub misses: u64,
    /// Policy removals: capacity pressure plus expiry
    pub evictions: u64,
    /// Subset of `evictions` caused by an elapsed TTL
    pub expired_removals: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total lookups observed.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Accounts for an entry leaving the cache.
    pub fn record_removal(&mut self, reason: EvictionReason) {
        match reason {
            EvictionReason::Capacity => self.evictions += 1,
            EvictionReason::Expired => {
                self.evictions += 1;
                self.expired_removals += 1;
            }
            EvictionReason::Removed | EvictionReason::Cleared => {}
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
