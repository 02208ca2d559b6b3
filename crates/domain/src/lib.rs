//! Pollpulse Domain Layer
pub mod config;
pub mod errors;
pub mod metrics;
pub mod poll;
pub mod trend;

pub use config::{AnalyticsConfig, CliOverrides, Config};
pub use errors::DomainError;
pub use metrics::{MetricKey, MetricValue, Overview, PollAnalytics, PopularPoll};
pub use poll::{ActivityItem, PollStats, PollSummary, RawAggregate};
pub use trend::{Timeframe, TrendBucket, TrendDirection, TrendReport, TrendScope};
