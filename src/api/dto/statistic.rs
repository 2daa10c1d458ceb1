//! DTOs for the statistic endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Visit statistics for a single short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticResponse {
    pub short_url: String,
    pub visits: u64,
    pub created_at: DateTime<Utc>,
}
