use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct CacheMetricsResponse {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub coalesced: u64,
    pub insertions: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub hit_rate: f64,
}
