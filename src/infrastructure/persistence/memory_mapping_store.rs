//! Process-local implementation of the mapping store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;

/// A stored record. Only the counter is mutable, so a shared reference is
/// enough to bump it.
#[derive(Debug)]
struct StoredRecord {
    code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    visit_count: AtomicU64,
}

impl StoredRecord {
    fn snapshot(&self) -> UrlRecord {
        UrlRecord::new(
            self.code.clone(),
            self.original_url.clone(),
            self.created_at,
            self.visit_count.load(Ordering::Acquire),
        )
    }
}

#[derive(Debug, Default)]
struct Inner {
    /// Records in insertion order.
    records: Vec<StoredRecord>,
    /// code → position in `records`.
    index: HashMap<String, usize>,
}

/// In-memory mapping store.
///
/// Inserts take the write lock, so the presence check and the insert are one
/// step. Lookups, listing and visit increments share the read lock; counters
/// are atomics and never lose an increment.
///
/// Contents live as long as the process. Owned by whoever builds the
/// service and injected explicitly; there is no global instance.
#[derive(Debug, Default)]
pub struct InMemoryMappingStore {
    inner: RwLock<Inner>,
}

impl InMemoryMappingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn insert_if_absent(&self, new_record: NewUrlRecord) -> Result<bool, AppError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let position = inner.records.len();

        match inner.index.entry(new_record.code.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(position);
                inner.records.push(StoredRecord {
                    code: new_record.code,
                    original_url: new_record.original_url,
                    created_at: new_record.created_at,
                    visit_count: AtomicU64::new(0),
                });
                Ok(true)
            }
        }
    }

    async fn get(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let inner = self.inner.read().await;

        Ok(inner
            .index
            .get(code)
            .map(|&position| inner.records[position].snapshot()))
    }

    async fn list(&self) -> Result<Vec<UrlRecord>, AppError> {
        let inner = self.inner.read().await;

        Ok(inner.records.iter().map(|r| r.snapshot()).collect())
    }

    async fn increment_visit(&self, code: &str) -> Result<bool, AppError> {
        let inner = self.inner.read().await;

        match inner.index.get(code) {
            Some(&position) => {
                inner.records[position]
                    .visit_count
                    .fetch_add(1, Ordering::AcqRel);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
