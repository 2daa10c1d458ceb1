//! Handler for the encode endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::encode::{EncodeRequest, EncodeResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/encode`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortUrl": "Ab3dE9xY",
///   "link": "http://localhost:5000/Ab3dE9xY",
///   "originalUrl": "https://example.com",
///   "createdAt": "2025-03-01T12:00:00.123456Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or the URL is empty.
/// Returns 503 Service Unavailable if no free code was found.
pub async fn encode_handler(
    State(state): State<AppState>,
    payload: Result<Json<EncodeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EncodeResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state.shortener.encode(&payload.original_url).await?;

    Ok((
        StatusCode::CREATED,
        Json(EncodeResponse {
            link: state.link_for(&record.code),
            short_url: record.code,
            original_url: record.original_url,
            created_at: record.created_at,
        }),
    ))
}
