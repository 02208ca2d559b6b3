mod get_overview;
mod get_poll_analytics;
mod get_popular;
mod get_trends;
mod invalidate_poll;

pub use get_overview::GetOverviewUseCase;
pub use get_poll_analytics::GetPollAnalyticsUseCase;
pub use get_popular::GetPopularUseCase;
pub use get_trends::GetTrendsUseCase;
pub use invalidate_poll::InvalidatePollMetricsUseCase;

use crate::ports::{ComputeFuture, MetricCache};
use pollpulse_domain::{DomainError, MetricKey, MetricValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Run a cached computation, retrying exactly once on transient failure.
/// NotFound and validation errors surface immediately; the cache leaves
/// the key absent after a failure, so the retry starts a fresh
/// computation.
pub(crate) async fn get_or_compute_with_retry<F>(
    cache: &Arc<dyn MetricCache>,
    key: MetricKey,
    ttl: Duration,
    make_compute: F,
) -> Result<MetricValue, DomainError>
where
    F: Fn() -> ComputeFuture,
{
    match cache.get_or_compute(key.clone(), ttl, make_compute()).await {
        Err(e) if e.is_transient() => {
            warn!(key = %key, error = %e, "Metric computation failed, retrying once");
            cache.get_or_compute(key, ttl, make_compute()).await
        }
        other => other,
    }
}
