mod analytics;
mod cache;

pub use analytics::{InvalidateResponse, OverviewQuery, PopularQuery, TrendsQuery};
pub use cache::CacheMetricsResponse;
