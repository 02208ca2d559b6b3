//! Buckets vote timestamps into fixed-width windows and classifies the
//! sequence as increasing, decreasing or stable.

use chrono::{DateTime, Duration, Utc};
use pollpulse_domain::{TrendBucket, TrendDirection, TrendReport};

/// Partition `[now - window_count * window_span, now)` into
/// `window_count` equal buckets, count the timestamps falling in each,
/// and classify the direction. Timestamps outside the range are dropped;
/// they are out of scope for the requested window, not an error.
pub fn classify(
    timestamps: &[DateTime<Utc>],
    window_count: u32,
    window_span: Duration,
    threshold: f64,
    now: DateTime<Utc>,
) -> TrendReport {
    let range_start = now - window_span * window_count as i32;
    let span_ms = window_span.num_milliseconds();

    let mut counts = vec![0u64; window_count as usize];
    for ts in timestamps {
        if *ts < range_start || *ts >= now {
            continue;
        }
        let index = ((*ts - range_start).num_milliseconds() / span_ms) as usize;
        // The last bucket's end boundary is exclusive but integer division
        // can land exactly on window_count for ts == now - 1ms rounding.
        counts[index.min(window_count as usize - 1)] += 1;
    }

    let direction = direction_of(&counts, threshold);

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| TrendBucket {
            bucket_start: range_start + window_span * i as i32,
            count,
        })
        .collect();

    TrendReport { buckets, direction }
}

/// Compare the mean of the first half of buckets against the second
/// half. Fewer than 2 buckets with votes means there is not enough
/// signal to call a direction.
pub fn direction_of(counts: &[u64], threshold: f64) -> TrendDirection {
    if counts.len() < 2 {
        return TrendDirection::Stable;
    }

    let non_zero = counts.iter().filter(|&&c| c > 0).count();
    if non_zero < 2 {
        return TrendDirection::Stable;
    }

    let half = counts.len() / 2;
    let first_mean = mean(&counts[..half]);
    let second_mean = mean(&counts[half..]);

    if second_mean > first_mean * (1.0 + threshold) {
        TrendDirection::Increasing
    } else if second_mean < first_mean * (1.0 - threshold) {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

fn mean(counts: &[u64]) -> f64 {
    counts.iter().sum::<u64>() as f64 / counts.len() as f64
}
