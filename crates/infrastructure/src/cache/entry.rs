use pollpulse_domain::MetricValue;
use std::time::Instant;

/// One cached metric with its expiry. Owned exclusively by the cache;
/// callers only ever see cloned values.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: MetricValue,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn new(value: MetricValue, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    pub fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}
