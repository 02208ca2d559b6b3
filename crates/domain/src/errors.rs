use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Poll not found: {0}")]
    PollNotFound(i64),

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(u32),

    #[error("Invalid trend window: {0}")]
    InvalidWindow(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Metric computation failed: {0}")]
    ComputationFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Errors the engine may retry exactly once before surfacing.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::DatabaseError(_) | DomainError::ComputationFailure(_)
        )
    }
}
