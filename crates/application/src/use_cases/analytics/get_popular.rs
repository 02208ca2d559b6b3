use super::get_or_compute_with_retry;
use crate::ports::{MetricCache, MetricStore};
use chrono::Utc;
use pollpulse_domain::config::AnalyticsConfig;
use pollpulse_domain::{DomainError, MetricKey, MetricValue, PopularPoll, Timeframe};
use std::sync::Arc;

/// Platform-wide popularity ranking within a timeframe, cached with the
/// real-time TTL. The limit is bounded before the cache sees the request.
pub struct GetPopularUseCase {
    store: Arc<dyn MetricStore>,
    cache: Arc<dyn MetricCache>,
    config: AnalyticsConfig,
}

impl GetPopularUseCase {
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

    pub async fn execute(
        &self,
        limit: u32,
        timeframe: Timeframe,
    ) -> Result<Vec<PopularPoll>, DomainError> {
        if limit == 0 || limit > self.config.max_popular_limit {
            return Err(DomainError::InvalidLimit(limit));
        }

        let key = MetricKey::popular(limit, timeframe);
        let ttl = self.config.ttl_realtime();

        let value = get_or_compute_with_retry(&self.cache, key, ttl, || {
            let store = Arc::clone(&self.store);
            Box::pin(async move {
                let cutoff = timeframe.cutoff(Utc::now());
                store
                    .fetch_popular(limit, cutoff)
                    .await
                    .map(MetricValue::Popular)
            })
        })
        .await?;

        match value {
            MetricValue::Popular(polls) => Ok(polls),
            other => Err(DomainError::ComputationFailure(format!(
                "expected popularity ranking, got {other:?}"
            ))),
        }
    }
}
