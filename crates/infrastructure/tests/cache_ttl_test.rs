use futures::FutureExt;
use pollpulse_application::ports::{ComputeFuture, MetricCache};
use pollpulse_domain::{MetricKey, MetricValue, PopularPoll, Timeframe, TrendScope};
use pollpulse_infrastructure::InMemoryMetricCache;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn value_with_votes(vote_count: u64) -> MetricValue {
    MetricValue::Popular(vec![PopularPoll {
        poll_id: 1,
        question: Arc::from("Favorite color?"),
        vote_count,
        engagement_rate: 10.0,
        created_at: chrono::Utc::now(),
        option_count: 2,
    }])
}

fn counted_compute(call_count: Arc<AtomicUsize>, vote_count: u64) -> ComputeFuture {
    async move {
        call_count.fetch_add(1, Ordering::SeqCst);
        Ok(value_with_votes(vote_count))
    }
    .boxed()
}

fn vote_count_of(value: &MetricValue) -> u64 {
    match value {
        MetricValue::Popular(polls) => polls[0].vote_count,
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[tokio::test]
async fn test_fresh_entry_served_without_recompute() {
    let cache = InMemoryMetricCache::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = MetricKey::overview(1);

    let first = cache
        .get_or_compute(
            key.clone(),
            Duration::from_secs(300),
            counted_compute(Arc::clone(&calls), 10),
        )
        .await
        .unwrap();

    let second = cache
        .get_or_compute(
            key,
            Duration::from_secs(300),
            counted_compute(Arc::clone(&calls), 99),
        )
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(vote_count_of(&first), 10);
    assert_eq!(vote_count_of(&second), 10, "second read must be the cached value");

    let snapshot = cache.snapshot();
    assert_eq!(snapshot.hits, 1);
    assert_eq!(snapshot.misses, 1);
}

#[tokio::test]
async fn test_expired_entry_recomputed() {
    let cache = InMemoryMetricCache::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = MetricKey::overview(2);

    cache
        .get_or_compute(
            key.clone(),
            Duration::from_millis(20),
            counted_compute(Arc::clone(&calls), 10),
        )
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(40)).await;

    let refreshed = cache
        .get_or_compute(
            key,
            Duration::from_millis(20),
            counted_compute(Arc::clone(&calls), 20),
        )
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2, "stale entry must recompute");
    assert_eq!(vote_count_of(&refreshed), 20);
}

#[tokio::test]
async fn test_purge_expired_removes_only_stale_entries() {
    let cache = InMemoryMetricCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    cache
        .get_or_compute(
            MetricKey::overview(1),
            Duration::from_millis(10),
            counted_compute(Arc::clone(&calls), 1),
        )
        .await
        .unwrap();
    cache
        .get_or_compute(
            MetricKey::overview(2),
            Duration::from_secs(300),
            counted_compute(Arc::clone(&calls), 2),
        )
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(30)).await;

    let removed = cache.purge_expired();

    assert_eq!(removed, 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.snapshot().expirations, 1);
}

#[tokio::test]
async fn test_purge_expired_noop_when_all_fresh() {
    let cache = InMemoryMetricCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    cache
        .get_or_compute(
            MetricKey::overview(3),
            Duration::from_secs(300),
            counted_compute(Arc::clone(&calls), 1),
        )
        .await
        .unwrap();

    assert_eq!(cache.purge_expired(), 0);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_invalidate_single_key() {
    let cache = InMemoryMetricCache::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let key = MetricKey::poll_analytics(4);

    cache
        .get_or_compute(
            key.clone(),
            Duration::from_secs(300),
            counted_compute(Arc::clone(&calls), 1),
        )
        .await
        .unwrap();

    cache.invalidate(&key);
    assert!(cache.is_empty());

    cache
        .get_or_compute(
            key,
            Duration::from_secs(300),
            counted_compute(Arc::clone(&calls), 2),
        )
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.snapshot().invalidations, 1);
}

#[tokio::test]
async fn test_invalidate_poll_removes_derived_and_cross_poll_keys() {
    let cache = InMemoryMetricCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let keys = [
        MetricKey::poll_analytics(7),
        MetricKey::trends(TrendScope::Poll(7), 24, 3600),
        MetricKey::trends(TrendScope::Global, 24, 3600),
        MetricKey::popular(10, Timeframe::Week),
        MetricKey::poll_analytics(8),
        MetricKey::overview(1),
    ];

    for key in &keys {
        cache
            .get_or_compute(
                key.clone(),
                Duration::from_secs(300),
                counted_compute(Arc::clone(&calls), 1),
            )
            .await
            .unwrap();
    }

    cache.invalidate_poll(7);

    // Poll 7's keys, the popular ranking, and the global trend are gone;
    // poll 8 and the user overview stay.
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.snapshot().invalidations, 4);

    cache
        .get_or_compute(
            MetricKey::poll_analytics(8),
            Duration::from_secs(300),
            counted_compute(Arc::clone(&calls), 9),
        )
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 6, "surviving entries still serve hits");
}

#[tokio::test]
async fn test_invalidate_poll_on_empty_cache_is_noop() {
    let cache = InMemoryMetricCache::new();
    cache.invalidate_poll(99);
    assert!(cache.is_empty());
    assert_eq!(cache.snapshot().invalidations, 0);
}
