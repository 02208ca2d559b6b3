use async_trait::async_trait;
use futures::future::BoxFuture;
use pollpulse_domain::{DomainError, MetricKey, MetricValue};
use std::time::Duration;

pub type ComputeFuture = BoxFuture<'static, Result<MetricValue, DomainError>>;

/// Snapshot of metric cache counters for API exposure.
#[derive(Debug, Clone, Default)]
pub struct CacheMetricsSnapshot {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Requests that waited on another caller's in-flight computation
    /// instead of starting their own.
    pub coalesced: u64,
    pub insertions: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub hit_rate: f64,
}

/// TTL cache with per-key singleflight.
///
/// Per key the entry moves Absent -> Computing -> Fresh -> Stale ->
/// Computing -> ... Concurrent callers of a key in Computing state wait
/// for the one in-flight computation and receive the same value; a
/// failed computation leaves the key Absent and delivers the error to
/// every waiter. Failures are never stored.
#[async_trait]
pub trait MetricCache: Send + Sync {
    /// Return the cached value if fresh, otherwise run `compute` (at most
    /// once per key across concurrent callers) and cache its result for
    /// `ttl`.
    ///
    /// The compute future runs detached from the calling task: a caller
    /// that gives up waiting does not cancel a computation other waiters
    /// depend on.
    async fn get_or_compute(
        &self,
        key: MetricKey,
        ttl: Duration,
        compute: ComputeFuture,
    ) -> Result<MetricValue, DomainError>;

    /// Drop one key regardless of TTL.
    fn invalidate(&self, key: &MetricKey);

    /// Drop every key derived from a poll: its own metrics plus the
    /// cross-poll rankings and global trends that include its votes.
    fn invalidate_poll(&self, poll_id: i64);

    /// Remove entries past their expiry. Returns how many were removed.
    fn purge_expired(&self) -> usize;

    fn snapshot(&self) -> CacheMetricsSnapshot;
}
