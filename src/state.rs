//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::utils::short_url::short_link;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    /// Public prefix of short links, without a trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>, base_url: &str) -> Self {
        Self {
            shortener,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Full short link for a code.
    pub fn link_for(&self, code: &str) -> String {
        short_link(&self.base_url, code)
    }
}
