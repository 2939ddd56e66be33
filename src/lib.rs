//! LRU TTL Cache - A bounded, thread-safe in-process cache
//!
//! Least-recently-used eviction with optional per-entry time-to-live,
//! eviction notification and hit/miss statistics. The `api`, `models` and
//! `tasks` modules serve a `String` cache over HTTP.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use lru_ttl_cache::cache::{EvictionReason, LruCache};
//!
//! let cache: LruCache<&str, u32> = LruCache::new(2).unwrap();
//! cache.subscribe(|key, _, reason| {
//!     assert_eq!((*key, reason), ("a", EvictionReason::Capacity));
//! });
//!
//! cache.set("a", 1, None);
//! cache.set("b", 2, Some(Duration::from_secs(60)));
//! cache.set("c", 3, None); // evicts "a"
//!
//! assert_eq!(cache.get("a"), None);
//! assert_eq!(cache.get("b"), Some(2));
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::LruCache;
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_purge_task;
