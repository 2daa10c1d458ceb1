//! Handler for the decode endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::decode::{DecodeRequest, DecodeResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::extract_code;

/// Resolves a short URL to its original URL and counts the visit.
///
/// # Endpoint
///
/// `POST /api/decode`
///
/// # Request Body
///
/// `shortUrl` may be the bare code or the full short link:
///
/// ```json
/// { "shortUrl": "Ab3dE9xY" }
/// ```
///
/// # Response
///
/// ```json
/// { "originalUrl": "https://example.com" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or `shortUrl` is blank.
/// Returns 404 Not Found if the code is unknown.
pub async fn decode_handler(
    State(state): State<AppState>,
    payload: Result<Json<DecodeRequest>, JsonRejection>,
) -> Result<Json<DecodeResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let code = extract_code(&payload.short_url).ok_or_else(|| {
        AppError::bad_request(
            "Please enter a short URL to decode",
            json!({ "field": "shortUrl" }),
        )
    })?;

    let original_url = state.shortener.decode(&code).await?;

    Ok(Json(DecodeResponse { original_url }))
}
