use pollpulse_application::ports::{MetricCache, MetricStore};
use pollpulse_infrastructure::{InMemoryMetricCache, SqliteMetricStore};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub metric_store: Arc<dyn MetricStore>,
    pub cache: Arc<dyn MetricCache>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            metric_store: Arc::new(SqliteMetricStore::new(pool)),
            cache: Arc::new(InMemoryMetricCache::new()),
        }
    }
}
