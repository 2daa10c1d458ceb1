//! URL record entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its visit counter.
///
/// Records are append-only: once created, `code`, `original_url` and
/// `created_at` never change. Only `visit_count` grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub visit_count: u64,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        visit_count: u64,
    ) -> Self {
        Self {
            code,
            original_url,
            created_at,
            visit_count,
        }
    }

    /// Returns the visit statistics of this record.
    pub fn stats(&self) -> VisitStats {
        VisitStats {
            visit_count: self.visit_count,
            created_at: self.created_at,
        }
    }
}

/// Input data for inserting a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewUrlRecord {
    /// The record as it looks right after a successful insert.
    pub fn into_record(self) -> UrlRecord {
        UrlRecord::new(self.code, self.original_url, self.created_at, 0)
    }
}

/// Visit statistics for a single code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitStats {
    pub visit_count: u64,
    pub created_at: DateTime<Utc>,
}
