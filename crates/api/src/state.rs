use pollpulse_application::ports::MetricCache;
use pollpulse_application::use_cases::{
    GetOverviewUseCase, GetPollAnalyticsUseCase, GetPopularUseCase, GetTrendsUseCase,
    InvalidatePollMetricsUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_overview: Arc<GetOverviewUseCase>,
    pub get_poll_analytics: Arc<GetPollAnalyticsUseCase>,
    pub get_trends: Arc<GetTrendsUseCase>,
    pub get_popular: Arc<GetPopularUseCase>,
    pub invalidate_poll: Arc<InvalidatePollMetricsUseCase>,
    pub cache: Arc<dyn MetricCache>,
}
