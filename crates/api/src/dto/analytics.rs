use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct OverviewQuery {
    pub user_id: i64,
}

#[derive(Deserialize, Debug)]
pub struct TrendsQuery {
    /// Absent means platform-wide trends.
    pub poll_id: Option<i64>,
    #[serde(default = "default_windows")]
    pub windows: u32,
    #[serde(default = "default_span")]
    pub span: String,
}

fn default_windows() -> u32 {
    24
}

fn default_span() -> String {
    "1h".to_string()
}

#[derive(Deserialize, Debug)]
pub struct PopularQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
}

fn default_limit() -> u32 {
    10
}

fn default_timeframe() -> String {
    "all".to_string()
}

#[derive(Serialize, Debug, Clone)]
pub struct InvalidateResponse {
    pub poll_id: i64,
    pub invalidated: bool,
}
