mod metric_cache;
mod metric_store;

pub use metric_cache::{CacheMetricsSnapshot, ComputeFuture, MetricCache};
pub use metric_store::MetricStore;
