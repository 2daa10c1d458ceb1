//! Application error type and its HTTP representation.
//!
//! Every failure reaching the HTTP boundary is rendered as the same JSON shape:
//!
//! ```json
//! { "error": "not_found", "message": "Short URL not found", "details": { "code": "Ab3dE9" } }
//! ```
//!
//! Clients only rely on `message`; `error` is the machine-readable kind.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Serialized error body.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub error: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced by the shortening engine.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Empty or malformed input. Never retried internally.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short code. A normal outcome, not a fault.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Encode ran out of attempts while every candidate collided.
    /// Safe to retry from the caller's side.
    #[error("{message}")]
    CollisionExhausted { message: String, details: Value },

    /// The persistence backend failed or is unreachable.
    #[error("{message}")]
    StorageFault { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn collision_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CollisionExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::StorageFault {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::CollisionExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::StorageFault { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into its serializable body.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (error, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::CollisionExhausted { message, details } => {
                ("collision_exhausted", message, details)
            }
            AppError::StorageFault { message, details } => ("storage_fault", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            error,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(self.to_error_info())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", e);
        AppError::storage("Storage unavailable", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message, json!({ "fields": errors }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Request body must be valid JSON",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
