//! Periodic sweep of expired cache entries
//!
//! Purely a memory reclamation task: `get`/`has` already treat expired entries as
//! absent whether or not a sweep has run.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;

use super::ResponseCache;

/// Interval between sweeps
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn a background task that removes expired entries every `interval`.
///
/// The task runs until aborted through the returned handle.
pub fn spawn_sweep_task(cache: Arc<ResponseCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Starting cache sweep every {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_expired();
            if removed > 0 {
                debug!("Cache sweep: removed {} expired entries", removed);
            }
        }
    })
}
