//! DTOs for the encode endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EncodeRequest {
    /// The original URL to shorten.
    #[validate(length(min = 1, message = "Please enter a URL to shorten"))]
    pub original_url: String,
}

/// A freshly created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResponse {
    /// The short code.
    pub short_url: String,
    /// The full short link, e.g. `http://localhost:5000/Ab3dE9`.
    pub link: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}
