//! DTOs for the list endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One stored mapping.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlListItem {
    pub short_url: String,
    pub link: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub visits: u64,
}
