//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /health`      - Health check
//! - `/api/*`            - REST API consumed by the front-end
//! - anything else       - JSON 404
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Cross-origin access for the browser front-end
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware.
///
/// `cors_allowed_origin` restricts cross-origin access to one origin; `None`
/// allows any origin.
pub fn build_router(state: AppState, cors_allowed_origin: Option<&str>) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(fallback_handler)
        .with_state(state)
        .layer(cors::layer(cors_allowed_origin))
        .layer(tracing::layer())
}

/// Constructs the application service, with trailing slashes trimmed before
/// routing.
pub fn app_router(state: AppState, cors_allowed_origin: Option<&str>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, cors_allowed_origin))
}
