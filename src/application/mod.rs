//! Application layer services implementing business logic.
//!
//! Services consume the storage traits from [`crate::domain::repositories`]
//! and provide the API used by HTTP handlers and the admin CLI.
//!
//! - [`services::shortener_service::ShortenerService`] - Encode, decode, list, statistics
//! - [`services::stats_tracker::StatsTracker`] - Visit accounting

pub mod services;
