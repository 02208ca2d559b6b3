//! Pollpulse HTTP API
//!
//! Axum routes over the analytics use cases. Handlers translate query
//! parameters, delegate to the application layer and map `DomainError`
//! to HTTP status codes.
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_api_routes;
pub use state::AppState;
