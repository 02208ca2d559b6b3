use super::get_or_compute_with_retry;
use crate::ports::{MetricCache, MetricStore};
use crate::services::scorer;
use chrono::Utc;
use pollpulse_domain::config::AnalyticsConfig;
use pollpulse_domain::{DomainError, MetricKey, MetricValue, PollAnalytics};
use std::sync::Arc;
use tracing::warn;

/// Derived metrics for a single poll, cached with the real-time TTL.
/// `PollNotFound` surfaces uncached; the cache never stores failures.
pub struct GetPollAnalyticsUseCase {
    store: Arc<dyn MetricStore>,
    cache: Arc<dyn MetricCache>,
    config: AnalyticsConfig,
}

impl GetPollAnalyticsUseCase {
    pub fn new(
        store: Arc<dyn MetricStore>,
        cache: Arc<dyn MetricCache>,
        config: AnalyticsConfig,
    ) -> Self {
        Self {
            store,
            cache,
            config,
        }
    }

    pub async fn execute(&self, poll_id: i64) -> Result<PollAnalytics, DomainError> {
        let key = MetricKey::poll_analytics(poll_id);
        let ttl = self.config.ttl_realtime();

        let value = get_or_compute_with_retry(&self.cache, key, ttl, || {
            let store = Arc::clone(&self.store);
            let config = self.config.clone();
            Box::pin(async move {
                compute_poll_analytics(store, poll_id, &config)
                    .await
                    .map(MetricValue::Poll)
            })
        })
        .await?;

        match value {
            MetricValue::Poll(analytics) => Ok(analytics),
            other => Err(DomainError::ComputationFailure(format!(
                "expected poll metric, got {other:?}"
            ))),
        }
    }
}

async fn compute_poll_analytics(
    store: Arc<dyn MetricStore>,
    poll_id: i64,
    config: &AnalyticsConfig,
) -> Result<PollAnalytics, DomainError> {
    let aggregate = store.fetch_aggregate(poll_id).await?;

    if !aggregate.is_consistent() {
        warn!(
            poll_id,
            total_votes = aggregate.total_votes,
            "Option counts do not sum to total_votes"
        );
    }

    let now = Utc::now();

    Ok(PollAnalytics {
        poll_id,
        question: Arc::clone(&aggregate.question),
        total_votes: aggregate.total_votes,
        total_views: aggregate.view_count,
        engagement_rate: scorer::engagement_rate(&aggregate),
        vote_distribution: scorer::vote_distribution(&aggregate),
        performance_score: scorer::performance_score(&aggregate, aggregate.age_days(now), config),
        vote_velocity: scorer::vote_velocity(aggregate.total_votes, aggregate.age_hours(now)),
        peak_voting_hour: scorer::peak_voting_hour(&aggregate.vote_timestamps),
        created_at: aggregate.created_at,
    })
}
