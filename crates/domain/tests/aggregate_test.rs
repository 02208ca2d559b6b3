use chrono::{Duration, TimeZone, Utc};
use pollpulse_domain::RawAggregate;
use std::sync::Arc;

fn aggregate(total_votes: u64, counts: &[(&str, u64)]) -> RawAggregate {
    RawAggregate {
        poll_id: 1,
        question: Arc::from("Favorite language?"),
        total_votes,
        view_count: 100,
        vote_counts_by_option: counts
            .iter()
            .map(|(label, count)| (Arc::from(*label), *count))
            .collect(),
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        vote_timestamps: vec![],
    }
}

#[test]
fn test_consistency_holds_when_counts_sum_to_total() {
    let agg = aggregate(5, &[("Rust", 3), ("Go", 2), ("Zig", 0)]);
    assert!(agg.is_consistent());
}

#[test]
fn test_consistency_fails_on_mismatched_total() {
    let agg = aggregate(7, &[("Rust", 3), ("Go", 2)]);
    assert!(!agg.is_consistent());
}

#[test]
fn test_age_is_measured_from_creation() {
    let agg = aggregate(0, &[]);
    let now = agg.created_at + Duration::days(3);
    assert_eq!(agg.age_days(now), 3.0);
    assert_eq!(agg.age_hours(now), 72.0);
}

#[test]
fn test_age_never_goes_negative() {
    let agg = aggregate(0, &[]);
    let before_creation = agg.created_at - Duration::hours(1);
    assert_eq!(agg.age_days(before_creation), 0.0);
}
