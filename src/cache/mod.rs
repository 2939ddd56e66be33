//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction, TTL expiration and
//! eviction notification.

mod builder;
#[allow(clippy::module_inception)]
mod cache;
mod clock;
mod entry;
mod listener;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use builder::CacheBuilder;
pub use cache::LruCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use listener::{EvictionCallback, EvictionListeners, EvictionReason, ListenerId};
pub use lru::{LruList, NodeId};
pub use stats::CacheStats;
pub use store::CacheStore;
