//! Handler for per-code statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use serde_json::json;

use crate::api::dto::statistic::StatisticResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::extract_code;

/// Returns the visit count and creation time of a short URL.
///
/// # Endpoint
///
/// `GET /api/statistic/{shortUrl}`
///
/// `shortUrl` is a bare code or a percent-encoded full short link, as
/// accepted by `POST /api/decode`.
///
/// # Response
///
/// ```json
/// { "shortUrl": "Ab3dE9xY", "visits": 1, "createdAt": "2025-03-01T12:00:00.123456Z" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
pub async fn statistic_handler(
    State(state): State<AppState>,
    Path(short_url): Path<String>,
) -> Result<Json<StatisticResponse>, AppError> {
    let code = extract_code(&short_url).ok_or_else(|| {
        AppError::bad_request(
            "Please enter a short URL",
            json!({ "field": "shortUrl" }),
        )
    })?;
    let stats = state.shortener.get_statistics(&code).await?;

    Ok(Json(StatisticResponse {
        short_url: code,
        visits: stats.visit_count,
        created_at: stats.created_at,
    }))
}
