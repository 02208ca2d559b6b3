use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Raw per-poll counts as read from the store. Produced fresh for every
/// computation and never cached; only derived metrics are.
#[derive(Debug, Clone)]
pub struct RawAggregate {
    pub poll_id: i64,
    pub question: Arc<str>,
    pub total_votes: u64,
    pub view_count: u64,
    /// One entry per option, zero-vote options included, option order
    /// preserved.
    pub vote_counts_by_option: Vec<(Arc<str>, u64)>,
    pub created_at: DateTime<Utc>,
    pub vote_timestamps: Vec<DateTime<Utc>>,
}

impl RawAggregate {
    /// Invariant: per-option counts sum to total_votes.
    pub fn is_consistent(&self) -> bool {
        self.vote_counts_by_option
            .iter()
            .map(|(_, count)| count)
            .sum::<u64>()
            == self.total_votes
    }

    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        (now - self.created_at).num_seconds().max(0) as f64 / 86_400.0
    }

    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        (now - self.created_at).num_seconds().max(0) as f64 / 3_600.0
    }
}

/// Per-poll vote/view totals for a user's overview.
#[derive(Debug, Clone)]
pub struct PollStats {
    pub poll_id: i64,
    pub question: Arc<str>,
    pub total_votes: u64,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollSummary {
    pub poll_id: i64,
    pub question: Arc<str>,
    pub total_votes: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
    pub poll_id: i64,
    pub poll_question: Arc<str>,
    pub timestamp: DateTime<Utc>,
}
