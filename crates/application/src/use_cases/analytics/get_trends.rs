use super::get_or_compute_with_retry;
use crate::ports::{MetricCache, MetricStore};
use crate::services::trend_windower;
use chrono::{Duration, Utc};
use pollpulse_domain::config::AnalyticsConfig;
use pollpulse_domain::{DomainError, MetricKey, MetricValue, TrendReport, TrendScope};
use std::sync::Arc;

const MIN_WINDOW_COUNT: u32 = 2;
const MAX_WINDOW_COUNT: u32 = 168;
const MIN_SPAN_SECS: i64 = 300;
const MAX_SPAN_SECS: i64 = 7 * 86_400;

/// Vote trend classification over fixed-width time buckets. Historical
/// metric class: cached with the long TTL. Window parameters are
/// validated before anything reaches the cache.
pub struct GetTrendsUseCase {
    store: Arc<dyn MetricStore>,
    cache: Arc<dyn MetricCache>,
    config: AnalyticsConfig,
}

impl GetTrendsUseCase {
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
        scope: TrendScope,
        window_count: u32,
        window_span: Duration,
    ) -> Result<TrendReport, DomainError> {
        if !(MIN_WINDOW_COUNT..=MAX_WINDOW_COUNT).contains(&window_count) {
            return Err(DomainError::InvalidWindow(format!(
                "window count must be in [{MIN_WINDOW_COUNT}, {MAX_WINDOW_COUNT}], got {window_count}"
            )));
        }

        let span_secs = window_span.num_seconds();
        if !(MIN_SPAN_SECS..=MAX_SPAN_SECS).contains(&span_secs) {
            return Err(DomainError::InvalidWindow(format!(
                "window span must be between {MIN_SPAN_SECS}s and {MAX_SPAN_SECS}s, got {span_secs}s"
            )));
        }

        let key = MetricKey::trends(scope, window_count, span_secs);
        let ttl = self.config.ttl_historical();
        let threshold = self.config.trend_change_threshold;

        let value = get_or_compute_with_retry(&self.cache, key, ttl, || {
            let store = Arc::clone(&self.store);
            Box::pin(async move {
                let now = Utc::now();
                let since = now - window_span * window_count as i32;
                let timestamps = store.fetch_vote_timestamps(scope, since).await?;
                Ok(MetricValue::Trends(trend_windower::classify(
                    &timestamps,
                    window_count,
                    window_span,
                    threshold,
                    now,
                )))
            })
        })
        .await?;

        match value {
            MetricValue::Trends(report) => Ok(report),
            other => Err(DomainError::ComputationFailure(format!(
                "expected trend metric, got {other:?}"
            ))),
        }
    }
}
