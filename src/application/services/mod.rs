//! Business logic services for the application layer.

pub mod shortener_service;
pub mod stats_tracker;

pub use shortener_service::ShortenerService;
pub use stats_tracker::StatsTracker;
