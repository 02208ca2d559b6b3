//! Pollpulse Background Jobs
//!
//! Periodic maintenance tasks driven by tokio intervals and stopped
//! through a shared cancellation token.
pub mod cache_sweep;
pub mod runner;

pub use cache_sweep::CacheSweepJob;
pub use runner::JobRunner;
