use pollpulse_jobs::{CacheSweepJob, JobRunner};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockMetricCache;

#[tokio::test]
async fn test_cache_sweep_job_starts_without_panic() {
    let mock = Arc::new(MockMetricCache::new());
    let job = Arc::new(CacheSweepJob::new(mock));

    tokio::spawn(async move { job.start().await });

    sleep(Duration::from_millis(10)).await;
}

#[tokio::test]
async fn test_cache_sweep_fires_on_interval() {
    let mock = Arc::new(MockMetricCache::new().with_removed_per_purge(3));
    let job = Arc::new(CacheSweepJob::new(mock.clone()).with_interval(1));

    tokio::spawn(async move { job.start().await });

    sleep(Duration::from_millis(2200)).await;

    assert!(
        mock.purge_call_count() >= 1,
        "Sweep should have fired at least once"
    );
}

#[tokio::test]
async fn test_cache_sweep_stops_on_cancellation() {
    let mock = Arc::new(MockMetricCache::new());
    let token = CancellationToken::new();
    let job = Arc::new(
        CacheSweepJob::new(mock.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    let handle = tokio::spawn(async move { job.start().await });

    sleep(Duration::from_millis(1200)).await;
    token.cancel();
    sleep(Duration::from_millis(50)).await;

    assert!(handle.is_finished(), "Job should exit after cancellation");

    let calls_at_cancel = mock.purge_call_count();
    sleep(Duration::from_millis(1200)).await;
    assert_eq!(
        mock.purge_call_count(),
        calls_at_cancel,
        "No sweeps after cancellation"
    );
}

#[tokio::test]
async fn test_job_runner_spawns_cache_sweep() {
    let mock = Arc::new(MockMetricCache::new().with_removed_per_purge(1));
    let token = CancellationToken::new();

    JobRunner::new()
        .with_cache_sweep(CacheSweepJob::new(mock.clone()).with_interval(1))
        .with_shutdown_token(token.clone())
        .start()
        .await;

    sleep(Duration::from_millis(2200)).await;
    assert!(mock.purge_call_count() >= 1);

    token.cancel();
}
