//! Encode, decode, listing and statistics orchestration.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::application::services::StatsTracker;
use crate::domain::entities::{NewUrlRecord, UrlRecord, VisitStats};
use crate::domain::repositories::MappingStore;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_well_formed};

/// Default number of candidate codes tried per encode.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Service for shortening and resolving URLs.
///
/// The only place that decides between retrying and failing: the code
/// generator and the store never recover on their own.
///
/// # Duplicate submissions
///
/// Every encode mints a new code, even for a URL that is already stored.
/// Codes are unique; original URLs are not.
pub struct ShortenerService {
    store: Arc<dyn MappingStore>,
    generator: Arc<dyn CodeGenerator>,
    stats: StatsTracker,
    max_attempts: usize,
}

impl ShortenerService {
    /// Creates a new shortener service.
    ///
    /// `max_attempts` is raised to at least 1.
    pub fn new(
        store: Arc<dyn MappingStore>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            stats: StatsTracker::new(store.clone()),
            store,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Shortens a URL.
    ///
    /// Generates candidate codes and inserts the first one that is still free.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or contains
    /// control characters, which cannot travel in a `Location` header.
    /// Returns [`AppError::CollisionExhausted`] if every attempt collided.
    /// Returns [`AppError::StorageFault`] on backend errors.
    pub async fn encode(&self, original_url: &str) -> Result<UrlRecord, AppError> {
        let original_url = original_url.trim();
        if original_url.is_empty() {
            return Err(AppError::bad_request(
                "Please enter a URL to shorten",
                json!({ "field": "originalUrl" }),
            ));
        }
        if original_url.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "URL must not contain control characters",
                json!({ "field": "originalUrl" }),
            ));
        }

        metrics::counter!("shortener_encode_total").increment(1);

        for attempt in 1..=self.max_attempts {
            let new_record = NewUrlRecord {
                code: self.generator.generate()?,
                original_url: original_url.to_string(),
                // Storage backends keep microseconds.
                created_at: Utc::now().trunc_subsecs(6),
            };

            let code = new_record.code.clone();
            if self.store.insert_if_absent(new_record.clone()).await? {
                info!(code = %code, "Short URL created");
                return Ok(new_record.into_record());
            }

            metrics::counter!("shortener_encode_collisions_total").increment(1);
            warn!(code = %code, attempt, "Short code collision, retrying");
        }

        error!(attempts = self.max_attempts, "Failed to generate a unique short code");

        Err(AppError::collision_exhausted(
            "Failed to generate a unique short code, please retry",
            json!({ "attempts": self.max_attempts }),
        ))
    }

    /// Resolves a code to its original URL and counts the visit.
    ///
    /// The visit is recorded before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::StorageFault`] on backend errors.
    pub async fn decode(&self, code: &str) -> Result<String, AppError> {
        metrics::counter!("shortener_decode_total").increment(1);

        if !is_well_formed(code) {
            metrics::counter!("shortener_decode_not_found_total").increment(1);
            return Err(Self::not_found(code));
        }

        match self.stats.record_visit(code).await? {
            Some(updated) => {
                debug!(code = %updated.code, visits = updated.visit_count, "Visit recorded");
                Ok(updated.original_url)
            }
            None => {
                metrics::counter!("shortener_decode_not_found_total").increment(1);
                Err(Self::not_found(code))
            }
        }
    }

    /// Lists every stored record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFault`] on backend errors.
    pub async fn list(&self) -> Result<Vec<UrlRecord>, AppError> {
        self.store.list().await
    }

    /// Returns visit statistics for a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::StorageFault`] on backend errors.
    pub async fn get_statistics(&self, code: &str) -> Result<VisitStats, AppError> {
        if !is_well_formed(code) {
            return Err(Self::not_found(code));
        }

        self.stats
            .get_stats(code)
            .await?
            .ok_or_else(|| Self::not_found(code))
    }

    /// Checks that the storage backend is reachable.
    pub async fn health(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    fn not_found(code: &str) -> AppError {
        AppError::not_found("Short URL not found", json!({ "code": code }))
    }
}
