pub mod analytics;

pub use analytics::{
    GetOverviewUseCase, GetPollAnalyticsUseCase, GetPopularUseCase, GetTrendsUseCase,
    InvalidatePollMetricsUseCase,
};
