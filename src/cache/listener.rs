//! Eviction Listener Module
//!
//! Removal reasons and the registry of callbacks notified on every removal.

use std::fmt;

use serde::Serialize;

// == Eviction Reason ==
/// Why an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionReason {
    /// Dropped from the tail to make room or after a shrinking resize
    Capacity,
    /// Found past its expiry on access or during a purge scan
    Expired,
    /// Explicitly removed by the caller
    Removed,
    /// Dropped by a bulk clear
    Cleared,
}

impl EvictionReason {
    /// Policy-driven removals count towards the eviction statistics.
    pub fn is_eviction(self) -> bool {
        matches!(self, Self::Capacity | Self::Expired)
    }
}

impl fmt::Display for EvictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Capacity => "capacity",
            Self::Expired => "expired",
            Self::Removed => "removed",
            Self::Cleared => "cleared",
        };
        f.write_str(name)
    }
}

// == Listener Id ==
/// Token returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked once per removed entry.
pub type EvictionCallback<K, V> = Box<dyn Fn(&K, &V, EvictionReason) + Send + Sync>;

// == Listener Registry ==
/// Ordered set of eviction callbacks.
pub struct EvictionListeners<K, V> {
    listeners: Vec<(ListenerId, EvictionCallback<K, V>)>,
    next_id: u64,
}

impl<K, V> Default for EvictionListeners<K, V> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K, V> fmt::Debug for EvictionListeners<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvictionListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

impl<K, V> EvictionListeners<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback and returns its id.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: Fn(&K, &V, EvictionReason) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Drops a callback. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    /// Calls every callback in subscription order.
    pub fn notify(&self, key: &K, value: &V, reason: EvictionReason) {
        for (_, callback) in &self.listeners {
            callback(key, value, reason);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_only_policy_reasons_are_evictions() {
        assert!(EvictionReason::Capacity.is_eviction());
        assert!(EvictionReason::Expired.is_eviction());
        assert!(!EvictionReason::Removed.is_eviction());
        assert!(!EvictionReason::Cleared.is_eviction());
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(EvictionReason::Capacity.to_string(), "capacity");
        assert_eq!(EvictionReason::Cleared.to_string(), "cleared");
    }

    #[test]
    fn test_notify_reaches_all_subscribers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners: EvictionListeners<String, u32> = EvictionListeners::new();

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            listeners.subscribe(move |key, value, reason| {
                seen.lock().push((tag, key.clone(), *value, reason));
            });
        }

        listeners.notify(&"a".to_string(), &7, EvictionReason::Removed);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ("first", "a".to_string(), 7, EvictionReason::Removed));
        assert_eq!(seen[1].0, "second");
    }

    #[test]
    fn test_unsubscribe() {
        let mut listeners: EvictionListeners<u32, u32> = EvictionListeners::new();
        let id = listeners.subscribe(|_, _, _| {});

        assert_eq!(listeners.len(), 1);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(listeners.is_empty());
    }
}
