use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for metric computation and caching. Every threshold the
/// engine uses is a named option here rather than a constant buried in
/// the code.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// TTL for real-time metrics (overview, poll analytics, popular).
    #[serde(default = "default_ttl_realtime_secs")]
    pub ttl_realtime_secs: u64,

    /// TTL for historical trend metrics. Must be >= ttl_realtime_secs.
    #[serde(default = "default_ttl_historical_secs")]
    pub ttl_historical_secs: u64,

    /// Relative change between bucket-half means required to classify a
    /// trend as increasing or decreasing. In (0, 1).
    #[serde(default = "default_trend_change_threshold")]
    pub trend_change_threshold: f64,

    #[serde(default = "default_max_popular_limit")]
    pub max_popular_limit: u32,

    /// Days over which the performance-score recency factor decays to zero.
    #[serde(default = "default_decay_days")]
    pub decay_days: f64,

    #[serde(default = "default_vote_weight")]
    pub vote_weight: f64,

    #[serde(default = "default_engagement_weight")]
    pub engagement_weight: f64,

    #[serde(default = "default_recency_weight")]
    pub recency_weight: f64,

    /// Interval between expired-entry sweeps of the metric cache.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl AnalyticsConfig {
    pub fn ttl_realtime(&self) -> Duration {
        Duration::from_secs(self.ttl_realtime_secs)
    }

    pub fn ttl_historical(&self) -> Duration {
        Duration::from_secs(self.ttl_historical_secs)
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            ttl_realtime_secs: default_ttl_realtime_secs(),
            ttl_historical_secs: default_ttl_historical_secs(),
            trend_change_threshold: default_trend_change_threshold(),
            max_popular_limit: default_max_popular_limit(),
            decay_days: default_decay_days(),
            vote_weight: default_vote_weight(),
            engagement_weight: default_engagement_weight(),
            recency_weight: default_recency_weight(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_ttl_realtime_secs() -> u64 {
    300
}

fn default_ttl_historical_secs() -> u64 {
    3_600
}

fn default_trend_change_threshold() -> f64 {
    0.1
}

fn default_max_popular_limit() -> u32 {
    100
}

fn default_decay_days() -> f64 {
    30.0
}

fn default_vote_weight() -> f64 {
    10.0
}

fn default_engagement_weight() -> f64 {
    50.0
}

fn default_recency_weight() -> f64 {
    20.0
}

fn default_sweep_interval_secs() -> u64 {
    60
}
