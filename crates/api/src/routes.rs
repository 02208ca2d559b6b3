use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/analytics/overview", get(handlers::get_overview))
        .route("/analytics/polls/{poll_id}", get(handlers::get_poll_analytics))
        .route(
            "/analytics/polls/{poll_id}/invalidate",
            post(handlers::invalidate_poll),
        )
        .route("/analytics/trends", get(handlers::get_trends))
        .route("/analytics/popular", get(handlers::get_popular))
        .route("/analytics/cache/metrics", get(handlers::get_cache_metrics))
        .with_state(state)
}
