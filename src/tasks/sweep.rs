//! TTL Sweep Task
//!
//! Background task that periodically evicts expired cache entries that no
//! read has touched.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::SharedCache;

/// Handle to a running sweep loop. Created by [`SweepTask::start`] and
/// ended by [`SweepTask::stop`].
#[derive(Debug)]
pub struct SweepTask {
    handle: JoinHandle<()>,
    interval: Duration,
}

impl SweepTask {
    /// Spawns a task that sweeps `cache` every `interval`.
    ///
    /// The loop sleeps, takes the write lock, sweeps once and releases it, so
    /// passes never overlap. The first pass runs one full interval after
    /// start.
    ///
    /// # Example
    /// ```ignore
    /// let cache = shared(CacheStore::<String>::new(DEFAULT_TTL));
    /// let sweeper = SweepTask::start(cache.clone(), DEFAULT_SWEEP_INTERVAL);
    /// // Later, during shutdown:
    /// sweeper.stop().await;
    /// ```
    pub fn start<V>(cache: SharedCache<V>, interval: Duration) -> Self
    where
        V: Clone + Send + Sync + 'static,
    {
        let handle = tokio::spawn(async move {
            info!(
                "Starting TTL sweep task with interval of {} seconds",
                interval.as_secs()
            );

            loop {
                tokio::time::sleep(interval).await;

                let removed = cache.write().await.sweep();

                if removed > 0 {
                    info!("TTL sweep: removed {} expired entries", removed);
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }
        });

        Self { handle, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True until the task is stopped.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the loop. A pass already holding the lock completes first,
    /// since abort only takes effect at the next await point.
    pub async fn stop(self) {
        self.handle.abort();
        if let Err(e) = self.handle.await {
            if !e.is_cancelled() {
                warn!("TTL sweep task ended abnormally: {}", e);
            }
        }
        info!("TTL sweep task stopped");
    }
}
