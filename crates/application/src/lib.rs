//! Pollpulse Application Layer
//!
//! Ports (traits the infrastructure implements), pure metric services,
//! and the use cases that orchestrate cache, store and scoring.
pub mod ports;
pub mod services;
pub mod use_cases;
