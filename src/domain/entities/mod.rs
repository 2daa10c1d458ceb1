//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored code → URL mapping with its visit counter
//! - [`NewUrlRecord`] - Insert payload for a new mapping
//! - [`VisitStats`] - Per-code visit statistics

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord, VisitStats};
