//! Visit accounting on top of the mapping store.

use std::sync::Arc;

use crate::domain::entities::{UrlRecord, VisitStats};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;

/// Records visits and reports per-code statistics.
///
/// Kept apart from the mapping contract so that visit semantics can grow
/// (per-visit timestamps, referrers) without touching code → URL storage.
#[derive(Clone)]
pub struct StatsTracker {
    store: Arc<dyn MappingStore>,
}

impl StatsTracker {
    /// Creates a new tracker.
    pub fn new(store: Arc<dyn MappingStore>) -> Self {
        Self { store }
    }

    /// Atomically counts one visit and returns the updated record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` with the counter already incremented
    /// - `Ok(None)` if the code is unknown
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFault`] on backend errors.
    pub async fn record_visit(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        if !self.store.increment_visit(code).await? {
            return Ok(None);
        }

        self.store.get(code).await
    }

    /// Returns visit count and creation time for a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFault`] on backend errors.
    pub async fn get_stats(&self, code: &str) -> Result<Option<VisitStats>, AppError> {
        Ok(self.store.get(code).await?.map(|record| record.stats()))
    }
}
