#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use pollpulse_application::ports::{
    CacheMetricsSnapshot, ComputeFuture, MetricCache, MetricStore,
};
use pollpulse_domain::{
    ActivityItem, DomainError, MetricKey, MetricValue, PollStats, PopularPoll, RawAggregate,
    TrendScope,
};
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::sync::RwLock;

/// Configurable in-memory store. Every fetch method counts its calls so
/// tests can assert how often the cache let a computation through.
pub struct MockMetricStore {
    aggregates: RwLock<Vec<RawAggregate>>,
    polls: RwLock<Vec<PollStats>>,
    activity: RwLock<Vec<ActivityItem>>,
    timestamps: RwLock<Vec<DateTime<Utc>>>,
    popular: RwLock<Vec<PopularPoll>>,
    transient_failures: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockMetricStore {
    pub fn new() -> Self {
        Self {
            aggregates: RwLock::new(vec![]),
            polls: RwLock::new(vec![]),
            activity: RwLock::new(vec![]),
            timestamps: RwLock::new(vec![]),
            popular: RwLock::new(vec![]),
            transient_failures: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn add_aggregate(&self, aggregate: RawAggregate) {
        self.aggregates.write().unwrap().push(aggregate);
    }

    pub fn add_poll(&self, stats: PollStats) {
        self.polls.write().unwrap().push(stats);
    }

    pub fn set_timestamps(&self, timestamps: Vec<DateTime<Utc>>) {
        *self.timestamps.write().unwrap() = timestamps;
    }

    pub fn set_popular(&self, popular: Vec<PopularPoll>) {
        *self.popular.write().unwrap() = popular;
    }

    /// The next `count` fetches fail with a transient DatabaseError.
    pub fn fail_next(&self, count: usize) {
        self.transient_failures.store(count, Ordering::SeqCst);
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<(), DomainError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(DomainError::DatabaseError(
                "mock transient failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl MetricStore for MockMetricStore {
    async fn fetch_aggregate(&self, poll_id: i64) -> Result<RawAggregate, DomainError> {
        self.record_call()?;
        self.aggregates
            .read()
            .unwrap()
            .iter()
            .find(|a| a.poll_id == poll_id)
            .cloned()
            .ok_or(DomainError::PollNotFound(poll_id))
    }

    async fn fetch_poll_stats(&self, _user_id: i64) -> Result<Vec<PollStats>, DomainError> {
        self.record_call()?;
        Ok(self.polls.read().unwrap().clone())
    }

    async fn count_polls_created_since(
        &self,
        _user_id: i64,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        Ok(self
            .polls
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.created_at >= cutoff)
            .count() as u64)
    }

    async fn fetch_recent_activity(
        &self,
        _user_id: i64,
        limit: u32,
    ) -> Result<Vec<ActivityItem>, DomainError> {
        Ok(self
            .activity
            .read()
            .unwrap()
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_vote_timestamps(
        &self,
        _scope: TrendScope,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, DomainError> {
        self.record_call()?;
        Ok(self
            .timestamps
            .read()
            .unwrap()
            .iter()
            .filter(|ts| **ts >= since)
            .copied()
            .collect())
    }

    async fn fetch_popular(
        &self,
        limit: u32,
        _cutoff: Option<DateTime<Utc>>,
    ) -> Result<Vec<PopularPoll>, DomainError> {
        self.record_call()?;
        Ok(self
            .popular
            .read()
            .unwrap()
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Minimal caching MetricCache: stores every successful value forever,
/// no coalescing. Enough to observe whether a use case recomputed.
pub struct TestMetricCache {
    entries: DashMap<MetricKey, MetricValue, FxBuildHasher>,
}

impl TestMetricCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn contains(&self, key: &MetricKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[async_trait]
impl MetricCache for TestMetricCache {
    async fn get_or_compute(
        &self,
        key: MetricKey,
        _ttl: std::time::Duration,
        compute: ComputeFuture,
    ) -> Result<MetricValue, DomainError> {
        if let Some(value) = self.entries.get(&key) {
            return Ok(value.clone());
        }
        let value = compute.await?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    fn invalidate(&self, key: &MetricKey) {
        self.entries.remove(key);
    }

    fn invalidate_poll(&self, poll_id: i64) {
        let prefix = MetricKey::poll_prefix(poll_id);
        self.entries.retain(|key, _| {
            !(key.as_str().starts_with(&prefix)
                || key.as_str().starts_with("popular:")
                || key.as_str().starts_with("global:"))
        });
    }

    fn purge_expired(&self) -> usize {
        0
    }

    fn snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            total_entries: self.entries.len(),
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

pub fn sample_aggregate(poll_id: i64, now: DateTime<Utc>) -> RawAggregate {
    RawAggregate {
        poll_id,
        question: Arc::from("Tabs or spaces?"),
        total_votes: 50,
        view_count: 200,
        vote_counts_by_option: vec![(Arc::from("Tabs"), 30), (Arc::from("Spaces"), 20)],
        created_at: now - Duration::days(2),
        vote_timestamps: vec![
            now - Duration::hours(30),
            now - Duration::hours(6),
            now - Duration::hours(1),
        ],
    }
}

pub fn sample_poll_stats(poll_id: i64, votes: u64, views: u64, now: DateTime<Utc>) -> PollStats {
    PollStats {
        poll_id,
        question: Arc::from("Sample question"),
        total_votes: votes,
        view_count: views,
        created_at: now - Duration::days(3),
    }
}
