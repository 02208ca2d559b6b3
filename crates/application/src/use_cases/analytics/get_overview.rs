use super::get_or_compute_with_retry;
use crate::ports::{MetricCache, MetricStore};
use crate::services::scorer;
use chrono::{Datelike, Utc};
use pollpulse_domain::config::AnalyticsConfig;
use pollpulse_domain::{DomainError, MetricKey, MetricValue, Overview, PollSummary};
use std::sync::Arc;

const RECENT_ACTIVITY_LIMIT: u32 = 10;

/// Aggregated metrics across one user's polls, cached with the
/// real-time TTL. A user with no polls gets an all-zero overview.
pub struct GetOverviewUseCase {
    store: Arc<dyn MetricStore>,
    cache: Arc<dyn MetricCache>,
    config: AnalyticsConfig,
}

impl GetOverviewUseCase {
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

    pub async fn execute(&self, user_id: i64) -> Result<Overview, DomainError> {
        let key = MetricKey::overview(user_id);
        let ttl = self.config.ttl_realtime();

        let value = get_or_compute_with_retry(&self.cache, key, ttl, || {
            let store = Arc::clone(&self.store);
            Box::pin(async move { compute_overview(store, user_id).await.map(MetricValue::Overview) })
        })
        .await?;

        match value {
            MetricValue::Overview(overview) => Ok(overview),
            other => Err(DomainError::ComputationFailure(format!(
                "expected overview metric, got {other:?}"
            ))),
        }
    }
}

async fn compute_overview(
    store: Arc<dyn MetricStore>,
    user_id: i64,
) -> Result<Overview, DomainError> {
    let polls = store.fetch_poll_stats(user_id).await?;

    if polls.is_empty() {
        return Ok(Overview {
            total_polls: 0,
            total_votes_received: 0,
            average_engagement_rate: 0.0,
            most_popular_poll: None,
            recent_activity: vec![],
            polls_created_this_month: 0,
            total_poll_views: 0,
        });
    }

    let now = Utc::now();
    let month_start = now
        .date_naive()
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(now);

    let total_votes: u64 = polls.iter().map(|p| p.total_votes).sum();
    let total_views: u64 = polls.iter().map(|p| p.view_count).sum();

    let most_popular_poll = polls
        .iter()
        .filter(|p| p.total_votes > 0)
        .max_by_key(|p| p.total_votes)
        .map(|p| PollSummary {
            poll_id: p.poll_id,
            question: Arc::clone(&p.question),
            total_votes: p.total_votes,
            created_at: p.created_at,
        });

    let (activity, polls_this_month) = tokio::join!(
        store.fetch_recent_activity(user_id, RECENT_ACTIVITY_LIMIT),
        store.count_polls_created_since(user_id, month_start)
    );

    Ok(Overview {
        total_polls: polls.len() as u64,
        total_votes_received: total_votes,
        average_engagement_rate: scorer::average_engagement_rate(&polls),
        most_popular_poll,
        recent_activity: activity?,
        polls_created_this_month: polls_this_month?,
        total_poll_views: total_views,
    })
}
