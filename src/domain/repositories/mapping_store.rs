//! Storage contract for code → record mappings.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Concurrency-safe store of shortened URL records.
///
/// Unknown codes are reported as `None` / `false`, never as errors.
/// Backend failures are reported as [`AppError::StorageFault`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryMappingStore`] - process-local store
/// - [`crate::infrastructure::persistence::PgMappingStore`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Inserts the record only if its code is not present yet.
    ///
    /// The check and the insert are a single atomic step: of two concurrent
    /// inserts with the same code exactly one returns `Ok(true)`.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the record was inserted
    /// - `Ok(false)` if the code is already taken
    async fn insert_if_absent(&self, new_record: NewUrlRecord) -> Result<bool, AppError>;

    /// Finds a record by its code.
    async fn get(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Returns all records in insertion order.
    async fn list(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Atomically increments the visit counter of a record.
    ///
    /// Returns `Ok(false)` if the code is unknown.
    async fn increment_visit(&self, code: &str) -> Result<bool, AppError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
