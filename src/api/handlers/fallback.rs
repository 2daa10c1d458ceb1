//! Handler for unknown routes.

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Answers unmatched routes with the standard JSON error body.
pub async fn fallback_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
