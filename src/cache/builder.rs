//! Cache Builder Module
//!
//! Collects construction options for [`LruCache`].

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheStore, Clock, LruCache, SystemClock};
use crate::error::Result;

// == Cache Builder ==
/// Builder for [`LruCache`].
///
/// # Example
/// ```
/// use std::time::Duration;
/// use lru_ttl_cache::cache::LruCache;
///
/// let cache: LruCache<String, u32> = LruCache::builder(100)
///     .default_ttl(Duration::from_secs(30))
///     .build()
///     .unwrap();
/// cache.set("hits".to_string(), 1, None);
/// assert_eq!(cache.get("hits"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct CacheBuilder<K, V, S = RandomState, C = SystemClock> {
    capacity: usize,
    default_ttl: Option<Duration>,
    hasher: S,
    clock: C,
    _entries: PhantomData<fn() -> (K, V)>,
}

impl<K, V> CacheBuilder<K, V> {
    /// Starts a builder for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            default_ttl: None,
            hasher: RandomState::new(),
            clock: SystemClock,
            _entries: PhantomData,
        }
    }
}

impl<K, V, S, C> CacheBuilder<K, V, S, C> {
    /// TTL applied to writes that do not supply their own.
    pub fn default_ttl(mut self, ttl: impl Into<Option<Duration>>) -> Self {
        self.default_ttl = ttl.into();
        self
    }

    /// Hash builder used for key lookup.
    pub fn hasher<S2>(self, hasher: S2) -> CacheBuilder<K, V, S2, C> {
        CacheBuilder {
            capacity: self.capacity,
            default_ttl: self.default_ttl,
            hasher,
            clock: self.clock,
            _entries: PhantomData,
        }
    }

    /// Time source used for expiry.
    pub fn clock<C2>(self, clock: C2) -> CacheBuilder<K, V, S, C2> {
        CacheBuilder {
            capacity: self.capacity,
            default_ttl: self.default_ttl,
            hasher: self.hasher,
            clock,
            _entries: PhantomData,
        }
    }

    /// Builds the cache. Fails with `InvalidConfiguration` for zero capacity.
    pub fn build(self) -> Result<LruCache<K, V, S, C>>
    where
        K: Hash + Eq + Clone,
        V: Clone,
        S: BuildHasher,
        C: Clock,
    {
        let store = CacheStore::with_hasher(self.capacity, self.default_ttl, self.hasher)?;
        debug!(
            capacity = self.capacity,
            default_ttl = ?self.default_ttl,
            "cache created"
        );
        Ok(LruCache::from_parts(store, self.clock))
    }
}
