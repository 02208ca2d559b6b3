use chrono::Utc;
use pollpulse_application::ports::{MetricCache, MetricStore};
use pollpulse_application::use_cases::GetPollAnalyticsUseCase;
use pollpulse_domain::config::AnalyticsConfig;
use pollpulse_domain::DomainError;
use std::sync::Arc;

mod helpers;
use helpers::{sample_aggregate, MockMetricStore, TestMetricCache};

fn make_use_case(store: Arc<MockMetricStore>) -> GetPollAnalyticsUseCase {
    GetPollAnalyticsUseCase::new(
        store as Arc<dyn MetricStore>,
        Arc::new(TestMetricCache::new()) as Arc<dyn MetricCache>,
        AnalyticsConfig::default(),
    )
}

#[tokio::test]
async fn test_transient_failure_retried_once_and_succeeds() {
    let store = Arc::new(MockMetricStore::new());
    store.add_aggregate(sample_aggregate(1, Utc::now()));
    store.fail_next(1);

    let use_case = make_use_case(Arc::clone(&store));
    let analytics = use_case.execute(1).await.unwrap();

    assert_eq!(analytics.poll_id, 1);
    assert_eq!(store.fetch_call_count(), 2, "one failure, one retry");
}

#[tokio::test]
async fn test_persistent_transient_failure_surfaces_after_one_retry() {
    let store = Arc::new(MockMetricStore::new());
    store.add_aggregate(sample_aggregate(1, Utc::now()));
    store.fail_next(5);

    let use_case = make_use_case(Arc::clone(&store));
    let err = use_case.execute(1).await.unwrap_err();

    assert!(matches!(err, DomainError::DatabaseError(_)));
    assert_eq!(store.fetch_call_count(), 2, "exactly one retry, never more");
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let store = Arc::new(MockMetricStore::new());

    let use_case = make_use_case(Arc::clone(&store));
    let err = use_case.execute(42).await.unwrap_err();

    assert!(matches!(err, DomainError::PollNotFound(42)));
    assert_eq!(store.fetch_call_count(), 1);
}
