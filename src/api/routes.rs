//! API route configuration.

use crate::api::handlers::{decode_handler, encode_handler, list_handler, statistic_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, nested under `/api` by [`crate::routes::app_router`].
///
/// # Endpoints
///
/// - `POST /encode`                 - Create a short URL
/// - `POST /decode`                 - Resolve a short URL and count the visit
/// - `GET  /list`                   - All short URLs in creation order
/// - `GET  /statistic/{shortUrl}`   - Visit count and creation time
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/encode", post(encode_handler))
        .route("/decode", post(decode_handler))
        .route("/list", get(list_handler))
        .route("/statistic/{short_url}", get(statistic_handler))
}
