//! Pure metric computations. No I/O and no shared state: these run
//! inside the cache's singleflight section without extra locking.

use chrono::{DateTime, Timelike, Utc};
use pollpulse_domain::config::AnalyticsConfig;
use pollpulse_domain::{PollStats, RawAggregate};
use std::sync::Arc;

/// Percentage of viewers who cast a vote, in [0, 100].
///
/// Zero views yields 0.0 by policy (a poll nobody saw has no
/// engagement), never a division by zero.
pub fn engagement_rate(aggregate: &RawAggregate) -> f64 {
    if aggregate.view_count == 0 {
        return 0.0;
    }
    let rate = aggregate.total_votes as f64 / aggregate.view_count as f64 * 100.0;
    rate.min(100.0)
}

/// Composite score in [0, 100] combining vote volume, engagement and
/// recency.
///
/// Contract: monotonically non-decreasing in total_votes and
/// non-increasing in age_days for fixed other inputs.
pub fn performance_score(aggregate: &RawAggregate, age_days: f64, config: &AnalyticsConfig) -> f64 {
    let engagement_fraction = if aggregate.view_count > 0 {
        aggregate.total_votes as f64 / aggregate.view_count as f64
    } else {
        0.0
    };

    let recency_factor = (1.0 - age_days / config.decay_days).max(0.0);

    let raw = aggregate.total_votes as f64 * config.vote_weight
        + engagement_fraction * config.engagement_weight
        + recency_factor * config.recency_weight;

    raw.clamp(0.0, 100.0)
}

/// Vote counts per option, zero-vote options included, option order
/// preserved. Counts always sum to total_votes.
pub fn vote_distribution(aggregate: &RawAggregate) -> Vec<(Arc<str>, u64)> {
    aggregate.vote_counts_by_option.clone()
}

/// Votes per hour since poll creation.
pub fn vote_velocity(total_votes: u64, age_hours: f64) -> f64 {
    if age_hours <= 0.0 {
        return 0.0;
    }
    total_votes as f64 / age_hours
}

/// Hour of day (UTC) in which the most votes were cast. Ties resolve to
/// the earliest hour.
pub fn peak_voting_hour(timestamps: &[DateTime<Utc>]) -> Option<u32> {
    if timestamps.is_empty() {
        return None;
    }

    let mut counts = [0u64; 24];
    for ts in timestamps {
        counts[ts.hour() as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .max_by(|(hour_a, count_a), (hour_b, count_b)| {
            count_a.cmp(count_b).then(hour_b.cmp(hour_a))
        })
        .map(|(hour, _)| hour as u32)
}

/// Mean engagement rate over polls that have views; 0.0 when none do.
pub fn average_engagement_rate(polls: &[PollStats]) -> f64 {
    let mut total = 0.0;
    let mut counted = 0u64;

    for poll in polls {
        if poll.view_count > 0 {
            total += (poll.total_votes as f64 / poll.view_count as f64 * 100.0).min(100.0);
            counted += 1;
        }
    }

    if counted == 0 {
        return 0.0;
    }
    total / counted as f64
}
