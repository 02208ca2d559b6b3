use chrono::Duration;

/// Parse a window span like "30m", "1h" or "2d" into a duration.
/// Returns None for anything that is not a positive number followed by
/// a known unit.
pub fn parse_span(span: &str) -> Option<Duration> {
    if span.len() < 2 {
        return None;
    }

    let (value_str, unit) = span.split_at(span.len() - 1);
    let num: i64 = value_str.parse().ok()?;

    if num <= 0 {
        return None;
    }

    match unit {
        "m" => Some(Duration::minutes(num)),
        "h" => Some(Duration::hours(num)),
        "d" => Some(Duration::days(num)),
        _ => None,
    }
}
