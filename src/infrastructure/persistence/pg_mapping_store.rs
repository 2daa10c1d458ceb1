//! PostgreSQL implementation of the mapping store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct UrlRecordRow {
    code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    visit_count: i64,
}

impl From<UrlRecordRow> for UrlRecord {
    fn from(row: UrlRecordRow) -> Self {
        UrlRecord::new(
            row.code,
            row.original_url,
            row.created_at,
            // The column carries a `visit_count >= 0` check constraint.
            u64::try_from(row.visit_count).unwrap_or_default(),
        )
    }
}

/// PostgreSQL store for URL records.
///
/// Atomicity comes from single statements: the unique constraint on `code`
/// with `ON CONFLICT DO NOTHING` for inserts, and an in-place
/// `visit_count + 1` update for visits.
pub struct PgMappingStore {
    pool: Arc<PgPool>,
}

impl PgMappingStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn insert_if_absent(&self, new_record: NewUrlRecord) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_records (code, original_url, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(&new_record.code)
        .bind(&new_record.original_url)
        .bind(new_record.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRecordRow>(
            r#"
            SELECT code, original_url, created_at, visit_count
            FROM url_records
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn list(&self) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRecordRow>(
            r#"
            SELECT code, original_url, created_at, visit_count
            FROM url_records
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UrlRecord::from).collect())
    }

    async fn increment_visit(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE url_records
            SET visit_count = visit_count + 1
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
