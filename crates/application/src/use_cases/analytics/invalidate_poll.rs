use crate::ports::MetricCache;
use std::sync::Arc;
use tracing::debug;

/// Mutation hook: the vote-casting layer calls this whenever a vote is
/// recorded so the next read recomputes instead of serving a value that
/// predates the vote.
pub struct InvalidatePollMetricsUseCase {
    cache: Arc<dyn MetricCache>,
}

impl InvalidatePollMetricsUseCase {
    pub fn new(cache: Arc<dyn MetricCache>) -> Self {
        Self { cache }
    }

    pub fn execute(&self, poll_id: i64) {
        debug!(poll_id, "Invalidating cached metrics after vote");
        self.cache.invalidate_poll(poll_id);
    }
}
