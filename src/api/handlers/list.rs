//! Handler for the list endpoint.

use axum::{Json, extract::State};

use crate::api::dto::list::UrlListItem;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every short URL in creation order.
///
/// # Endpoint
///
/// `GET /api/list`
///
/// # Response
///
/// ```json
/// [
///   {
///     "shortUrl": "Ab3dE9xY",
///     "link": "http://localhost:5000/Ab3dE9xY",
///     "originalUrl": "https://example.com",
///     "createdAt": "2025-03-01T12:00:00.123456Z",
///     "visits": 3
///   }
/// ]
/// ```
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlListItem>>, AppError> {
    let records = state.shortener.list().await?;

    let items = records
        .into_iter()
        .map(|record| UrlListItem {
            link: state.link_for(&record.code),
            short_url: record.code,
            original_url: record.original_url,
            created_at: record.created_at,
            visits: record.visit_count,
        })
        .collect();

    Ok(Json(items))
}
