//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, service wiring, and the Axum server lifecycle.

use crate::application::services::ShortenerService;
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::MappingStore;
use crate::infrastructure::persistence::{InMemoryMappingStore, PgMappingStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Attempts made to reach PostgreSQL at startup.
const DB_CONNECT_ATTEMPTS: usize = 5;

/// Longest pause between two connection attempts.
const DB_CONNECT_MAX_DELAY: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The mapping store (in-memory, or PostgreSQL with migrations applied)
/// - The shortener service
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;

    let shortener = Arc::new(build_shortener(store, &config));
    let state = AppState::new(shortener, &config.base_url);

    let app = app_router(state, config.cors_allowed_origin.as_deref());

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Wires the shortener service on top of a store.
pub fn build_shortener(store: Arc<dyn MappingStore>, config: &Config) -> ShortenerService {
    ShortenerService::new(
        store,
        Arc::new(RandomCodeGenerator::new(config.code_length)),
        config.encode_max_attempts,
    )
}

/// Creates the mapping store selected by the configuration.
pub async fn build_store(config: &Config) -> Result<Arc<dyn MappingStore>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Ok(Arc::new(InMemoryMappingStore::new()))
        }
        StorageBackend::Postgres => {
            let pool = connect_database(config).await?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgMappingStore::new(Arc::new(pool))))
        }
    }
}

/// Connects to PostgreSQL, retrying with exponential backoff.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set for the postgres storage backend")?;

    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let pool = Retry::start(connect_backoff().map(jitter), || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!("Database connection failed: {}", e);
            })
        }
    })
    .await
    .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    Ok(pool)
}

/// Delays between connection attempts: 100 ms, 200 ms, 400 ms, ... capped at
/// [`DB_CONNECT_MAX_DELAY`].
fn connect_backoff() -> impl Iterator<Item = Duration> {
    // `from_millis` raises the base to successive powers, so the 100 ms
    // start comes from the factor.
    ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(DB_CONNECT_MAX_DELAY)
        .take(DB_CONNECT_ATTEMPTS - 1)
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
///
/// A signal that cannot be registered is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_backoff_schedule() {
        let delays: Vec<_> = connect_backoff().collect();

        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(800),
            ]
        );
    }

    #[test]
    fn test_connect_backoff_is_capped() {
        let delays: Vec<_> = ExponentialBackoff::from_millis(2)
            .factor(50)
            .max_delay(DB_CONNECT_MAX_DELAY)
            .take(20)
            .collect();

        assert!(delays.iter().all(|d| *d <= DB_CONNECT_MAX_DELAY));
        assert_eq!(delays.last(), Some(&DB_CONNECT_MAX_DELAY));
    }

    #[tokio::test]
    async fn test_shutdown_signal_stays_pending() {
        let result = tokio::time::timeout(Duration::from_millis(50), shutdown_signal()).await;

        assert!(result.is_err());
    }
}
