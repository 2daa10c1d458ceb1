#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use url_shortener::application::services::ShortenerService;
use url_shortener::domain::entities::{NewUrlRecord, UrlRecord};
use url_shortener::domain::repositories::MappingStore;
use url_shortener::error::AppError;
use url_shortener::infrastructure::persistence::InMemoryMappingStore;
use url_shortener::routes::build_router;
use url_shortener::state::AppState;
use url_shortener::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

pub const BASE_URL: &str = "http://localhost:5000";

/// Generator that always proposes the same code.
pub struct FixedCodeGenerator(pub &'static str);

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> Result<String, AppError> {
        Ok(self.0.to_string())
    }
}

/// Store whose backend is always unreachable.
pub struct UnavailableStore;

#[async_trait]
impl MappingStore for UnavailableStore {
    async fn insert_if_absent(&self, _new_record: NewUrlRecord) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn get(&self, _code: &str) -> Result<Option<UrlRecord>, AppError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<UrlRecord>, AppError> {
        Err(unavailable())
    }

    async fn increment_visit(&self, _code: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

fn unavailable() -> AppError {
    AppError::storage("Storage unavailable", json!({}))
}

pub fn create_test_state_with(
    store: Arc<dyn MappingStore>,
    generator: Arc<dyn CodeGenerator>,
) -> AppState {
    let shortener = Arc::new(ShortenerService::new(store, generator, 5));
    AppState::new(shortener, BASE_URL)
}

pub fn create_test_state() -> AppState {
    create_test_state_with(
        Arc::new(InMemoryMappingStore::new()),
        Arc::new(RandomCodeGenerator::default()),
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state, None)).unwrap()
}

/// Encodes a URL through the API and returns the new short code.
pub async fn encode(server: &TestServer, url: &str) -> String {
    let response = server
        .post("/api/encode")
        .json(&json!({ "originalUrl": url }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<Value>();
    json["shortUrl"].as_str().unwrap().to_string()
}
