use crate::{
    dto::{InvalidateResponse, OverviewQuery, PopularQuery, TrendsQuery},
    errors::ApiError,
    state::AppState,
    utils::parse_span,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use pollpulse_domain::{
    DomainError, Overview, PollAnalytics, PopularPoll, Timeframe, TrendReport, TrendScope,
};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_overview")]
pub async fn get_overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewQuery>,
) -> Result<Json<Overview>, ApiError> {
    debug!(user_id = params.user_id, "Fetching analytics overview");

    let overview = state.get_overview.execute(params.user_id).await?;
    Ok(Json(overview))
}

#[instrument(skip(state), name = "api_get_poll_analytics")]
pub async fn get_poll_analytics(
    State(state): State<AppState>,
    Path(poll_id): Path<i64>,
) -> Result<Json<PollAnalytics>, ApiError> {
    let analytics = state.get_poll_analytics.execute(poll_id).await?;
    Ok(Json(analytics))
}

#[instrument(skip(state), name = "api_get_trends")]
pub async fn get_trends(
    State(state): State<AppState>,
    Query(params): Query<TrendsQuery>,
) -> Result<Json<TrendReport>, ApiError> {
    let span = parse_span(&params.span).ok_or_else(|| {
        DomainError::InvalidWindow(format!("unparseable window span '{}'", params.span))
    })?;

    let scope = match params.poll_id {
        Some(poll_id) => TrendScope::Poll(poll_id),
        None => TrendScope::Global,
    };

    let report = state
        .get_trends
        .execute(scope, params.windows, span)
        .await?;
    Ok(Json(report))
}

#[instrument(skip(state), name = "api_get_popular")]
pub async fn get_popular(
    State(state): State<AppState>,
    Query(params): Query<PopularQuery>,
) -> Result<Json<Vec<PopularPoll>>, ApiError> {
    let timeframe: Timeframe = params.timeframe.parse()?;

    let polls = state.get_popular.execute(params.limit, timeframe).await?;
    Ok(Json(polls))
}

#[instrument(skip(state), name = "api_invalidate_poll")]
pub async fn invalidate_poll(
    State(state): State<AppState>,
    Path(poll_id): Path<i64>,
) -> Json<InvalidateResponse> {
    state.invalidate_poll.execute(poll_id);

    Json(InvalidateResponse {
        poll_id,
        invalidated: true,
    })
}
