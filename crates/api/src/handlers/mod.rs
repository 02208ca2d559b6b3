mod analytics;
mod cache;
mod health;

pub use analytics::{get_overview, get_poll_analytics, get_popular, get_trends, invalidate_poll};
pub use cache::get_cache_metrics;
pub use health::health_check;
