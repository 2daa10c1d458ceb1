//! DTOs for the decode endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to resolve a short URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DecodeRequest {
    /// A bare code or a full short link.
    #[validate(length(min = 1, message = "Please enter a short URL to decode"))]
    pub short_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResponse {
    pub original_url: String,
}
