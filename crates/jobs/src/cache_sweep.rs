use pollpulse_application::ports::MetricCache;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Periodically drops expired cache entries so memory tracks the live
/// working set instead of everything ever computed. Expired entries are
/// already invisible to readers; the sweep only reclaims them.
pub struct CacheSweepJob {
    cache: Arc<dyn MetricCache>,
    sweep_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(cache: Arc<dyn MetricCache>) -> Self {
        Self {
            cache,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, sweep_secs: u64) -> Self {
        self.sweep_interval_secs = sweep_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.sweep_interval_secs,
            "Starting cache sweep job"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.sweep_interval_secs));
        // The first tick fires immediately; skip it so a fresh start does
        // not sweep an empty cache.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("CacheSweepJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let removed = self.cache.purge_expired();
                    if removed > 0 {
                        let snapshot = self.cache.snapshot();
                        info!(
                            removed,
                            remaining = snapshot.total_entries,
                            "Cache sweep completed"
                        );
                    } else {
                        debug!("Cache sweep found nothing to remove");
                    }
                }
            }
        }
    }
}
