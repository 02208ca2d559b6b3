use crate::{dto::CacheMetricsResponse, state::AppState};
use axum::{extract::State, Json};
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_cache_metrics")]
pub async fn get_cache_metrics(State(state): State<AppState>) -> Json<CacheMetricsResponse> {
    let snapshot = state.cache.snapshot();

    debug!(
        total_entries = snapshot.total_entries,
        hits = snapshot.hits,
        misses = snapshot.misses,
        coalesced = snapshot.coalesced,
        hit_rate = snapshot.hit_rate,
        "Cache metrics retrieved"
    );

    Json(CacheMetricsResponse {
        total_entries: snapshot.total_entries,
        hits: snapshot.hits,
        misses: snapshot.misses,
        coalesced: snapshot.coalesced,
        insertions: snapshot.insertions,
        expirations: snapshot.expirations,
        invalidations: snapshot.invalidations,
        hit_rate: snapshot.hit_rate,
    })
}
