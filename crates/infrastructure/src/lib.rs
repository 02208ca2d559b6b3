//! Pollpulse Infrastructure Layer
//!
//! Adapters behind the application ports: the in-memory metric cache
//! and the SQLite metric store.
pub mod cache;
pub mod database;
pub mod repositories;

pub use cache::InMemoryMetricCache;
pub use repositories::SqliteMetricStore;
