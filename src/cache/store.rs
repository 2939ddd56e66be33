//! Cache Store Module
//!
//! Single-threaded cache engine combining a HashMap index with LRU ordering
//! and TTL expiration. Every operation takes the current instant explicitly;
//! locking and the clock live in [`LruCache`](crate::cache::LruCache).

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::time::{Duration, Instant};

use tracing::trace;

use crate::cache::entry::expiry_from;
use crate::cache::{CacheEntry, CacheStats, EvictionListeners, EvictionReason, LruList, NodeId};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Cache storage with LRU eviction, TTL support and eviction notification.
///
/// The index and the recency list always hold the same set of keys.
#[derive(Debug)]
pub struct CacheStore<K, V, S = RandomState> {
    /// Key to recency-list handle
    index: HashMap<K, NodeId, S>,
    /// Entries ordered most to least recently used
    order: LruList<CacheEntry<K, V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Removal callbacks
    listeners: EvictionListeners<K, V>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied when an operation does not supply one
    default_ttl: Option<Duration>,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// Fails with `InvalidConfiguration` when `capacity` is zero.
    pub fn new(capacity: usize, default_ttl: Option<Duration>) -> Result<Self> {
        Self::with_hasher(capacity, default_ttl, RandomState::new())
    }
}

impl<K, V, S> CacheStore<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Creates a new CacheStore that hashes keys with `hasher`.
    pub fn with_hasher(capacity: usize, default_ttl: Option<Duration>, hasher: S) -> Result<Self> {
        validate_capacity(capacity)?;
        Ok(Self {
            index: HashMap::with_capacity_and_hasher(capacity, hasher),
            order: LruList::with_capacity(capacity),
            stats: CacheStats::new(),
            listeners: EvictionListeners::new(),
            capacity,
            default_ttl,
        })
    }

    // == Set ==
    /// Stores a key-value pair, using the default TTL when `ttl` is None.
    ///
    /// A live key is updated in place and promoted. An expired occupant is
    /// removed as `Expired` first and the write proceeds as a new key: evict
    /// from the tail until there is room, then land at the head.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>, now: Instant) {
        let expires_at = expiry_from(ttl.or(self.default_ttl), now);

        if let Some(&id) = self.index.get(&key) {
            let live = self.order.get(id).is_some_and(|entry| !entry.is_expired(now));
            if live {
                if let Some(entry) = self.order.get_mut(id) {
                    entry.value = value;
                    entry.expires_at = expires_at;
                }
                self.order.move_to_front(id);
                return;
            }
            self.evict(id, EvictionReason::Expired);
        }

        self.insert_new(key, value, expires_at);
    }

    // == Get ==
    /// Retrieves a live value and promotes it to most recently used.
    ///
    /// An expired entry is removed and counted as a miss.
    pub fn get<Q>(&mut self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.touch(key, now) {
            Some(id) => self.order.get(id).map(|entry| &entry.value),
            None => None,
        }
    }

    // == Get Or Insert ==
    /// Returns the live value for `key`, or inserts the one produced by
    /// `factory`.
    ///
    /// The factory runs at most once, and only when the key is absent or
    /// expired. If it fails nothing is inserted and the error is returned.
    pub fn try_get_or_insert_with<F, E>(
        &mut self,
        key: K,
        ttl: Option<Duration>,
        now: Instant,
        factory: F,
    ) -> std::result::Result<&V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
    {
        let id = match self.touch(&key, now) {
            Some(id) => id,
            None => {
                let value = factory()?;
                let expires_at = expiry_from(ttl.or(self.default_ttl), now);
                self.insert_new(key, value, expires_at)
            }
        };
        Ok(self.value_at(id))
    }

    // == Contains ==
    /// Checks for a live entry without touching recency or statistics.
    pub fn contains_key<Q>(&self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .and_then(|&id| self.order.get(id))
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Remove ==
    /// Removes an entry whether or not it has expired.
    ///
    /// Returns false if the key was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&id) => {
                self.evict(id, EvictionReason::Removed);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes every entry, least recently used first.
    pub fn clear(&mut self) {
        while let Some(id) = self.order.back() {
            self.evict(id, EvictionReason::Cleared);
        }
    }

    // == Resize ==
    /// Changes the capacity, evicting from the tail if the cache shrinks.
    ///
    /// Returns the number of entries evicted.
    pub fn resize(&mut self, capacity: usize) -> Result<usize> {
        validate_capacity(capacity)?;
        self.capacity = capacity;

        let mut evicted = 0;
        while self.order.len() > capacity {
            match self.order.back() {
                Some(id) => {
                    self.evict(id, EvictionReason::Capacity);
                    evicted += 1;
                }
                None => break,
            }
        }
        Ok(evicted)
    }

    // == Purge Expired ==
    /// Inspects up to `max_to_scan` entries from the tail toward the head
    /// and removes the expired ones.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, max_to_scan: usize, now: Instant) -> usize {
        let mut cursor = self.order.back();
        let mut scanned = 0;
        let mut removed = 0;

        while let Some(id) = cursor {
            if scanned == max_to_scan {
                break;
            }
            scanned += 1;
            cursor = self.order.prev(id);

            let expired = self
                .order
                .get(id)
                .is_some_and(|entry| entry.is_expired(now));
            if expired {
                self.evict(id, EvictionReason::Expired);
                removed += 1;
            }
        }
        removed
    }

    // == Snapshot ==
    /// Copies the live entries, most recently used first.
    pub fn snapshot(&self, now: Instant) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.order
            .iter()
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zeroes all counters.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Default TTL ==
    /// Replaces the TTL used by later writes that do not supply one.
    pub fn set_default_ttl(&mut self, ttl: Option<Duration>) {
        self.default_ttl = ttl;
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Listeners ==
    /// Mutable access to the eviction callbacks.
    pub fn listeners_mut(&mut self) -> &mut EvictionListeners<K, V> {
        &mut self.listeners
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not
    /// yet removed.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Internals ==
    /// Looks up a key as a read: promotes and counts a hit when live,
    /// removes expired entries and counts a miss otherwise.
    fn touch<Q>(&mut self, key: &Q, now: Instant) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let expired = self.order.get(id).is_some_and(|entry| entry.is_expired(now));
        if expired {
            self.evict(id, EvictionReason::Expired);
            self.stats.record_miss();
            return None;
        }

        self.order.move_to_front(id);
        self.stats.record_hit();
        Some(id)
    }

    /// Inserts a key known to be absent, evicting from the tail first.
    fn insert_new(&mut self, key: K, value: V, expires_at: Option<Instant>) -> NodeId {
        while self.order.len() >= self.capacity {
            match self.order.back() {
                Some(tail) => self.evict(tail, EvictionReason::Capacity),
                None => break,
            }
        }

        let id = self
            .order
            .push_front(CacheEntry::new(key.clone(), value, expires_at));
        self.index.insert(key, id);
        id
    }

    /// Unlinks an entry, updates counters, then notifies listeners.
    fn evict(&mut self, id: NodeId, reason: EvictionReason) {
        let entry = self.order.remove(id);
        self.index.remove(&entry.key);

        self.stats.record_removal(reason);
        trace!(%reason, "cache entry removed");
        self.listeners.notify(&entry.key, &entry.value, reason);
    }

    fn value_at(&self, id: NodeId) -> &V {
        match self.order.get(id) {
            Some(entry) => &entry.value,
            None => unreachable!("index handle points at a freed slot"),
        }
    }
}

fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(CacheError::InvalidConfiguration(
            "capacity must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
