mod entry;
mod metrics;

pub use entry::CacheEntry;
pub use metrics::CacheCounters;

use async_trait::async_trait;
use dashmap::DashMap;
use pollpulse_application::ports::{CacheMetricsSnapshot, ComputeFuture, MetricCache};
use pollpulse_domain::{DomainError, MetricKey, MetricValue};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::debug;

type ComputeResult = Result<MetricValue, DomainError>;
type InflightSender = Arc<watch::Sender<Option<ComputeResult>>>;
type InflightMap = DashMap<MetricKey, InflightSender, FxBuildHasher>;

/// Removes the inflight registration when the computation ends, even if
/// it panics: any waiter still subscribed receives a failure instead of
/// hanging.
struct InflightGuard {
    inflight: Arc<InflightMap>,
    key: MetricKey,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        if let Some((_, tx)) = self.inflight.remove(&self.key) {
            let _ = tx.send(Some(Err(DomainError::ComputationFailure(
                "metric computation aborted".to_string(),
            ))));
        }
    }
}

/// TTL metric cache with per-key singleflight.
///
/// Per key: Absent -> Computing -> Fresh -> Stale -> Computing -> ...
/// The first caller to find a key absent or stale becomes the leader and
/// runs the computation; concurrent callers subscribe to a watch channel
/// and receive the leader's result. Stale readers block until the
/// in-flight recomputation finishes (no stale-while-revalidate). A
/// failed computation leaves the key absent and delivers the error to
/// every waiter; failures are never stored.
pub struct InMemoryMetricCache {
    entries: Arc<DashMap<MetricKey, CacheEntry, FxBuildHasher>>,
    inflight: Arc<InflightMap>,
    counters: Arc<CacheCounters>,
}

impl InMemoryMetricCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            inflight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            counters: Arc::new(CacheCounters::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_fresh(&self, key: &MetricKey) -> Option<MetricValue> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh(Instant::now()) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    fn register_or_join(&self, key: &MetricKey) -> (bool, watch::Receiver<Option<ComputeResult>>) {
        match self.inflight.entry(key.clone()) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                (false, rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, rx) = watch::channel(None::<ComputeResult>);
                e.insert(Arc::new(tx));
                (true, rx)
            }
        }
    }

    async fn wait_as_follower(
        &self,
        key: &MetricKey,
        mut rx: watch::Receiver<Option<ComputeResult>>,
    ) -> ComputeResult {
        if rx.changed().await.is_ok() {
            if let Some(result) = rx.borrow().clone() {
                return result;
            }
        }

        // Channel closed without a publication. The entry may still have
        // been written before the sender dropped.
        if let Some(result) = rx.borrow().clone() {
            return result;
        }
        if let Some(value) = self.check_fresh(key) {
            return Ok(value);
        }

        Err(DomainError::ComputationFailure(format!(
            "in-flight computation for {key} ended without a result"
        )))
    }

    fn spawn_leader(
        &self,
        key: MetricKey,
        ttl: Duration,
        compute: ComputeFuture,
    ) -> tokio::task::JoinHandle<ComputeResult> {
        let entries = Arc::clone(&self.entries);
        let inflight = Arc::clone(&self.inflight);
        let counters = Arc::clone(&self.counters);

        // Detached from the calling task: a leader that stops waiting
        // does not cancel the computation its followers depend on.
        tokio::spawn(async move {
            let guard = InflightGuard {
                inflight: Arc::clone(&inflight),
                key: key.clone(),
            };

            let result = compute.await;

            match &result {
                Ok(value) => {
                    entries.insert(
                        key.clone(),
                        CacheEntry::new(value.clone(), Instant::now() + ttl),
                    );
                    counters.record_insertion();
                }
                Err(e) => {
                    // Leave the key absent: a stale entry must not outlive
                    // a failed refresh, and failures are never cached.
                    entries.remove(&key);
                    debug!(key = %key, error = %e, "Metric computation failed");
                }
            }

            if let Some((_, tx)) = inflight.remove(&key) {
                let _ = tx.send(Some(result.clone()));
            }

            drop(guard);
            result
        })
    }
}

impl Default for InMemoryMetricCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricCache for InMemoryMetricCache {
    async fn get_or_compute(
        &self,
        key: MetricKey,
        ttl: Duration,
        compute: ComputeFuture,
    ) -> ComputeResult {
        if let Some(value) = self.check_fresh(&key) {
            self.counters.record_hit();
            return Ok(value);
        }

        let (is_leader, rx) = self.register_or_join(&key);

        if !is_leader {
            self.counters.record_coalesced();
            // The leader may have filled the entry between our freshness
            // check and the join.
            if let Some(value) = self.check_fresh(&key) {
                return Ok(value);
            }
            return self.wait_as_follower(&key, rx).await;
        }

        self.counters.record_miss();
        debug!(key = %key, "Cache MISS, computing");

        // Same interleaving on the leader side: a previous leader may
        // have published while we registered.
        if let Some(value) = self.check_fresh(&key) {
            if let Some((_, tx)) = self.inflight.remove(&key) {
                let _ = tx.send(Some(Ok(value.clone())));
            }
            return Ok(value);
        }

        match self.spawn_leader(key, ttl, compute).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::ComputationFailure(
                "metric computation task panicked".to_string(),
            )),
        }
    }

    fn invalidate(&self, key: &MetricKey) {
        if self.entries.remove(key).is_some() {
            self.counters.record_invalidations(1);
        }
    }

    fn invalidate_poll(&self, poll_id: i64) {
        let prefix = MetricKey::poll_prefix(poll_id);
        let mut removed = 0u64;

        // Cross-poll keys (rankings, global trends) include this poll's
        // votes, so they go too.
        self.entries.retain(|key, _| {
            let stale = key.as_str().starts_with(&prefix)
                || key.as_str().starts_with("popular:")
                || key.as_str().starts_with("global:");
            if stale {
                removed += 1;
            }
            !stale
        });

        if removed > 0 {
            self.counters.record_invalidations(removed);
            debug!(poll_id, removed, "Invalidated poll metrics");
        }
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0usize;

        self.entries.retain(|_, entry| {
            let fresh = entry.is_fresh(now);
            if !fresh {
                removed += 1;
            }
            fresh
        });

        if removed > 0 {
            self.counters.record_expirations(removed as u64);
        }
        removed
    }

    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.counters.snapshot(self.entries.len())
    }
}
