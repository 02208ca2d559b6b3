use super::Repositories;
use pollpulse_application::use_cases::{
    GetOverviewUseCase, GetPollAnalyticsUseCase, GetPopularUseCase, GetTrendsUseCase,
    InvalidatePollMetricsUseCase,
};
use pollpulse_domain::config::AnalyticsConfig;
use std::sync::Arc;

pub struct UseCases {
    pub get_overview: Arc<GetOverviewUseCase>,
    pub get_poll_analytics: Arc<GetPollAnalyticsUseCase>,
    pub get_trends: Arc<GetTrendsUseCase>,
    pub get_popular: Arc<GetPopularUseCase>,
    pub invalidate_poll: Arc<InvalidatePollMetricsUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: AnalyticsConfig) -> Self {
        Self {
            get_overview: Arc::new(GetOverviewUseCase::new(
                repos.metric_store.clone(),
                repos.cache.clone(),
                config.clone(),
            )),
            get_poll_analytics: Arc::new(GetPollAnalyticsUseCase::new(
                repos.metric_store.clone(),
                repos.cache.clone(),
                config.clone(),
            )),
            get_trends: Arc::new(GetTrendsUseCase::new(
                repos.metric_store.clone(),
                repos.cache.clone(),
                config.clone(),
            )),
            get_popular: Arc::new(GetPopularUseCase::new(
                repos.metric_store.clone(),
                repos.cache.clone(),
                config,
            )),
            invalidate_poll: Arc::new(InvalidatePollMetricsUseCase::new(repos.cache.clone())),
        }
    }
}
