//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Counts a visit exactly like `POST /api/decode` and answers
/// `307 Temporary Redirect`, so every visit keeps reaching the service.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 if the stored URL cannot be sent as a `Location` header.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.shortener.decode(&code).await?;

    let location = HeaderValue::try_from(original_url).map_err(|e| {
        tracing::error!(code = %code, "Stored URL is not a valid Location header: {}", e);
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "code": code }),
        )
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]))
}
