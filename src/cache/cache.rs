//! Thread-safe Cache Module
//!
//! Wraps a [`CacheStore`] in a single reader/writer lock together with a
//! clock. Reads that never reorder entries (`contains_key`, `snapshot`,
//! `stats`) share the lock; everything that promotes, inserts or removes
//! takes it exclusively, including `get`, because a hit moves the entry to
//! the head.
//!
//! Eviction listeners and `get_or_insert_with` factories run while the
//! exclusive lock is held. They must be quick and must not call back into
//! the same cache: the lock is not reentrant and doing so deadlocks.
//!
//! A panic in either propagates to the caller and the lock is released.
//! Operations are not transactional: if a listener panics while `set` or
//! `get_or_insert_with` is making room, the tail entry is already gone and
//! the new entry is never inserted. The cache stays internally consistent
//! and usable, but that write is lost.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::convert::Infallible;
use std::hash::{BuildHasher, Hash};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::{CacheBuilder, CacheStats, CacheStore, Clock, EvictionReason, ListenerId, SystemClock};
use crate::error::Result;

// == LRU Cache ==
/// Bounded, thread-safe LRU cache with optional per-entry TTL.
#[derive(Debug)]
pub struct LruCache<K, V, S = RandomState, C = SystemClock> {
    inner: RwLock<CacheStore<K, V, S>>,
    clock: C,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a cache holding at most `capacity` entries, with no default
    /// TTL and the system clock.
    pub fn new(capacity: usize) -> Result<Self> {
        CacheBuilder::new(capacity).build()
    }

    /// Starts configuring a cache.
    pub fn builder(capacity: usize) -> CacheBuilder<K, V> {
        CacheBuilder::new(capacity)
    }
}

impl<K, V, S, C> LruCache<K, V, S, C>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
    C: Clock,
{
    pub(crate) fn from_parts(store: CacheStore<K, V, S>, clock: C) -> Self {
        Self {
            inner: RwLock::new(store),
            clock,
        }
    }

    // == Writes ==
    /// Inserts or overwrites `key`, promoting it to most recently used.
    ///
    /// `ttl` overrides the default TTL for this entry.
    pub fn set(&self, key: K, value: V, ttl: Option<Duration>) {
        let mut store = self.inner.write();
        let now = self.clock.now();
        store.set(key, value, ttl, now);
    }

    /// Returns a copy of the live value for `key`, promoting it.
    ///
    /// Misses (including expired entries, which are removed) return `None`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut store = self.inner.write();
        let now = self.clock.now();
        store.get(key, now).cloned()
    }

    /// Returns the live value for `key`, computing and inserting it with
    /// `factory` if absent or expired.
    ///
    /// The factory runs at most once per call, under the exclusive lock, so
    /// concurrent callers for the same key see a single computation. A slow
    /// factory stalls every other operation on the cache.
    pub fn get_or_insert_with<F>(&self, key: K, ttl: Option<Duration>, factory: F) -> V
    where
        F: FnOnce() -> V,
    {
        match self.try_get_or_insert_with(key, ttl, || Ok::<V, Infallible>(factory())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// A factory error is returned to the caller and nothing is inserted.
    pub fn try_get_or_insert_with<F, E>(
        &self,
        key: K,
        ttl: Option<Duration>,
        factory: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
    {
        let mut store = self.inner.write();
        let now = self.clock.now();
        let value = store.try_get_or_insert_with(key, ttl, now, factory);
        value.cloned()
    }

    /// Removes `key`. Returns false if it was absent.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(key)
    }

    /// Removes every entry. Capacity and default TTL are kept.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Changes the capacity, evicting least recently used entries if it
    /// shrinks below the current size.
    pub fn resize(&self, capacity: usize) -> Result<()> {
        let evicted = self.inner.write().resize(capacity)?;
        debug!(capacity, evicted, "cache resized");
        Ok(())
    }

    /// Scans up to `max_to_scan` entries from the least recently used end
    /// and removes those that have expired.
    ///
    /// Expiry does not follow recency, so one call is not guaranteed to find
    /// every expired entry.
    pub fn purge_expired(&self, max_to_scan: usize) -> usize {
        let mut store = self.inner.write();
        let now = self.clock.now();
        let removed = store.purge_expired(max_to_scan, now);
        if removed > 0 {
            debug!(removed, max_to_scan, "purged expired entries");
        }
        removed
    }

    /// Replaces the TTL applied to later writes that do not supply one.
    pub fn set_default_ttl(&self, ttl: Option<Duration>) {
        self.inner.write().set_default_ttl(ttl);
    }

    /// Zeroes the hit, miss, eviction and expiry counters.
    pub fn reset_stats(&self) {
        self.inner.write().reset_stats();
    }

    // == Reads ==
    /// Checks for a live entry without affecting recency or statistics.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let store = self.inner.read();
        store.contains_key(key, self.clock.now())
    }

    /// Copies the live entries, most recently used first.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        let store = self.inner.read();
        store.snapshot(self.clock.now())
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.inner.read().default_ttl()
    }

    /// Number of stored entries, counting expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    // == Notification ==
    /// Registers a callback invoked once for every entry that leaves the
    /// cache, with the reason it left.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&K, &V, EvictionReason) + Send + Sync + 'static,
    {
        self.inner.write().listeners_mut().subscribe(listener)
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.write().listeners_mut().unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::CacheError;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn manual_cache(capacity: usize) -> (LruCache<String, String, RandomState, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let cache = LruCache::builder(capacity)
            .clock(clock.clone())
            .build()
            .unwrap();
        (cache, clock)
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        let result: Result<LruCache<String, String>> = LruCache::new(0);
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_set_get_with_str_lookup() {
        let cache: LruCache<String, u32> = LruCache::new(4).unwrap();

        cache.set("answer".to_string(), 42, None);

        assert_eq!(cache.get("answer"), Some(42));
        assert!(cache.contains_key("answer"));
        assert_eq!(cache.get("question"), None);
    }

    #[test]
    fn test_expiry_uses_injected_clock() {
        let (cache, clock) = manual_cache(4);

        cache.set("k".to_string(), "v".to_string(), Some(Duration::from_millis(10)));
        clock.advance(Duration::from_millis(15));

        assert!(!cache.contains_key("k"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_listener_receives_removals() {
        let (cache, _clock) = manual_cache(1);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = cache.subscribe(move |key: &String, value: &String, reason| {
            sink.lock().push((key.clone(), value.clone(), reason));
        });

        cache.set("a".to_string(), "1".to_string(), None);
        cache.set("b".to_string(), "2".to_string(), None);
        cache.remove("b");

        assert_eq!(
            *seen.lock(),
            vec![
                ("a".to_string(), "1".to_string(), EvictionReason::Capacity),
                ("b".to_string(), "2".to_string(), EvictionReason::Removed),
            ]
        );

        assert!(cache.unsubscribe(id));
        cache.set("c".to_string(), "3".to_string(), None);
        cache.clear();
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_get_or_insert_runs_factory_once_across_threads() {
        let cache: Arc<LruCache<String, usize>> = Arc::new(LruCache::new(8).unwrap());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_insert_with("shared".to_string(), None, || {
                        thread::sleep(Duration::from_millis(5));
                        calls.fetch_add(1, Ordering::SeqCst) + 100
                    })
                })
            })
            .collect();

        let results: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|&v| v == 100));
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 7);
    }

    #[test]
    fn test_try_get_or_insert_propagates_error() {
        let cache: LruCache<String, String> = LruCache::new(2).unwrap();

        let result = cache.try_get_or_insert_with("k".to_string(), None, || Err("factory failed"));

        assert_eq!(result, Err("factory failed"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_writers_respect_capacity() {
        let cache: Arc<LruCache<u32, u32>> = Arc::new(LruCache::new(16).unwrap());

        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500u32 {
                        let key = (t * 1000) + (i % 50);
                        cache.set(key, i, None);
                        cache.get(&key);
                        assert!(cache.len() <= 16);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 16);
        assert_eq!(cache.snapshot().len(), 16);
    }

    #[test]
    fn test_resize_and_default_ttl_accessors() {
        let (cache, clock) = manual_cache(4);

        cache.set_default_ttl(Some(Duration::from_secs(1)));
        assert_eq!(cache.default_ttl(), Some(Duration::from_secs(1)));

        for key in ["a", "b", "c"] {
            cache.set(key.to_string(), key.to_string(), None);
        }
        cache.resize(2).unwrap();
        assert_eq!(cache.capacity(), 2);

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.purge_expired(10), 2);
        assert!(cache.is_empty());
        assert!(cache.resize(0).is_err());
    }

    #[test]
    fn test_listener_panic_during_eviction_loses_only_that_write() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let (cache, _clock) = manual_cache(1);
        cache.set("a".to_string(), "1".to_string(), None);
        cache.subscribe(|_: &String, _: &String, reason| {
            if reason == EvictionReason::Capacity {
                panic!("listener failure");
            }
        });

        let result = catch_unwind(AssertUnwindSafe(|| {
            cache.set("b".to_string(), "2".to_string(), None);
        }));

        assert!(result.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().evictions, 1);

        // Lock released and structure intact
        cache.set("c".to_string(), "3".to_string(), None);
        assert_eq!(cache.get("c"), Some("3".to_string()));
    }
}
