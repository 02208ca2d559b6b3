use async_trait::async_trait;
use pollpulse_application::ports::{CacheMetricsSnapshot, ComputeFuture, MetricCache};
use pollpulse_domain::{DomainError, MetricKey, MetricValue};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct MockMetricCache {
    purge_calls: AtomicUsize,
    removed_per_purge: AtomicUsize,
}

impl MockMetricCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_removed_per_purge(self, removed: usize) -> Self {
        self.removed_per_purge.store(removed, Ordering::SeqCst);
        self
    }

    pub fn purge_call_count(&self) -> usize {
        self.purge_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricCache for MockMetricCache {
    async fn get_or_compute(
        &self,
        _key: MetricKey,
        _ttl: Duration,
        compute: ComputeFuture,
    ) -> Result<MetricValue, DomainError> {
        compute.await
    }

    fn invalidate(&self, _key: &MetricKey) {}

    fn invalidate_poll(&self, _poll_id: i64) {}

    fn purge_expired(&self) -> usize {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        self.removed_per_purge.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            total_entries: 0,
            hits: 0,
            misses: 0,
            coalesced: 0,
            insertions: 0,
            expirations: 0,
            invalidations: 0,
            hit_rate: 0.0,
        }
    }
}
