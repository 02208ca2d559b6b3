use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pollpulse_domain::{
    ActivityItem, DomainError, PollStats, PopularPoll, RawAggregate, TrendScope,
};

/// Read-only access to raw poll/vote/view state. Implementations must
/// reflect the latest committed writes at call time; staleness is
/// entirely the cache's responsibility.
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Full aggregate for one poll. `PollNotFound` for unknown ids.
    async fn fetch_aggregate(&self, poll_id: i64) -> Result<RawAggregate, DomainError>;

    /// Vote/view totals for every poll owned by a user. Empty for users
    /// with no polls.
    async fn fetch_poll_stats(&self, user_id: i64) -> Result<Vec<PollStats>, DomainError>;

    async fn count_polls_created_since(
        &self,
        user_id: i64,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError>;

    /// Most recent votes across a user's polls, newest first.
    async fn fetch_recent_activity(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<ActivityItem>, DomainError>;

    /// Vote timestamps for a poll or for the whole system, at or after
    /// `since`. `PollNotFound` when a poll scope names an unknown poll.
    async fn fetch_vote_timestamps(
        &self,
        scope: TrendScope,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, DomainError>;

    /// Polls ranked by votes cast at or after `cutoff` (all time when
    /// None), descending, at most `limit` rows.
    async fn fetch_popular(
        &self,
        limit: u32,
        cutoff: Option<DateTime<Utc>>,
    ) -> Result<Vec<PopularPoll>, DomainError>;
}
