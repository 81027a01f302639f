//! Purge Task
//!
//! Background task that periodically removes aged cache entries. Lazy on-access
//! eviction already keeps lookups correct; the sweep reclaims memory held by
//! entries no caller touches anymore.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::QueryCache;

/// Spawns a background task that periodically purges aged cache entries.
///
/// The task runs in an infinite loop, sleeping for the configured interval
/// between sweeps. Each sweep removes entries older than `max_age`.
///
/// # Arguments
/// * `cache` - Shared cache instance
/// * `purge_interval_secs` - Interval in seconds between sweeps
/// * `max_age` - Entries at least this old are removed
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
pub fn spawn_purge_task<V>(
    cache: Arc<QueryCache<V>>,
    purge_interval_secs: u64,
    max_age: Duration,
) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
{
    let interval = Duration::from_secs(purge_interval_secs);

    tokio::spawn(async move {
        info!(
            interval_secs = purge_interval_secs,
            max_age_secs = max_age.as_secs(),
            "starting cache purge task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired(max_age);

            if removed > 0 {
                info!(removed, "purge: removed aged entries");
            } else {
                debug!("purge: no aged entries found");
            }
        }
    })
}
