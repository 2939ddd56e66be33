//! Expiry Purge Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, LruCache};

/// Spawns a background task that periodically purges expired entries.
///
/// Each run inspects at most `batch` entries from the least recently used
/// end, so a single run never holds the cache lock for long. Expired entries
/// nearer the head are picked up by later runs or when they are next read.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(LruCache::new(1000)?);
/// let purge_handle = spawn_purge_task(cache.clone(), Duration::from_secs(1), 128);
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_purge_task<K, V, S, C>(
    cache: Arc<LruCache<K, V, S, C>>,
    interval: Duration,
    batch: usize,
) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    S: BuildHasher + Send + Sync + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(?interval, batch, "expiry purge task started");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired(batch);

            if removed > 0 {
                info!(removed, "expiry purge removed entries");
            } else {
                debug!("expiry purge found nothing");
            }
        }
    })
}
