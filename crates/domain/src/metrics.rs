use crate::poll::{ActivityItem, PollSummary};
use crate::trend::{Timeframe, TrendReport, TrendScope};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Canonical cache key for one metric computation. The interned string is
/// the cache's sole index; every key derived from a poll starts with
/// `poll:{id}:` so invalidation by poll is a prefix match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricKey(Arc<str>);

impl MetricKey {
    pub fn overview(user_id: i64) -> Self {
        Self(Arc::from(format!("user:{user_id}:overview").as_str()))
    }

    pub fn poll_analytics(poll_id: i64) -> Self {
        Self(Arc::from(format!("poll:{poll_id}:analytics").as_str()))
    }

    pub fn trends(scope: TrendScope, window_count: u32, window_span_secs: i64) -> Self {
        Self(Arc::from(
            format!("{scope}:trends:{window_count}x{window_span_secs}").as_str(),
        ))
    }

    pub fn popular(limit: u32, timeframe: Timeframe) -> Self {
        Self(Arc::from(format!("popular:{limit}:{timeframe}").as_str()))
    }

    /// Prefix shared by every key scoped to one poll.
    pub fn poll_prefix(poll_id: i64) -> String {
        format!("poll:{poll_id}:")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregated metrics across one user's polls.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_polls: u64,
    pub total_votes_received: u64,
    pub average_engagement_rate: f64,
    pub most_popular_poll: Option<PollSummary>,
    pub recent_activity: Vec<ActivityItem>,
    pub polls_created_this_month: u64,
    pub total_poll_views: u64,
}

/// Derived metrics for a single poll.
#[derive(Debug, Clone, Serialize)]
pub struct PollAnalytics {
    pub poll_id: i64,
    pub question: Arc<str>,
    pub total_votes: u64,
    pub total_views: u64,
    pub engagement_rate: f64,
    pub vote_distribution: Vec<(Arc<str>, u64)>,
    pub performance_score: f64,
    pub vote_velocity: f64,
    /// Hour of day (UTC, 0-23) with the most votes, if any were cast.
    pub peak_voting_hour: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopularPoll {
    pub poll_id: i64,
    pub question: Arc<str>,
    pub vote_count: u64,
    pub engagement_rate: f64,
    pub created_at: DateTime<Utc>,
    pub option_count: u64,
}

/// The one value type the metric cache stores. Cheap to clone: every
/// waiter released by a singleflight computation receives a clone.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Overview(Overview),
    Poll(PollAnalytics),
    Trends(TrendReport),
    Popular(Vec<PopularPoll>),
}
