//! CLI administration tool for url-shortener.
//!
//! Works directly against the PostgreSQL store, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- encode https://example.com/some/long/path
//!
//! # List all short links
//! cargo run --bin admin -- list
//!
//! # Show statistics for one short link
//! cargo run --bin admin -- stats Ab3dE9xY
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`)
//! - `BASE_URL`, `CODE_LENGTH`, `ENCODE_MAX_ATTEMPTS`, `DB_*` pool settings:
//!   same meaning and validation as for the server

use url_shortener::application::services::ShortenerService;
use url_shortener::config::{self, Config};
use url_shortener::infrastructure::persistence::PgMappingStore;
use url_shortener::server;
use url_shortener::utils::short_url::{extract_code, short_link};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Encode {
        /// URL to shorten
        url: String,
    },

    /// List all short links
    List,

    /// Show visit statistics for a short link
    Stats {
        /// Short code or full short link
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_postgres_from_env()?;

    let pool = server::connect_database(&config).await?;

    match cli.command {
        Commands::Encode { url } => {
            encode(&shortener(&pool, &config), &config.base_url, &url).await?
        }
        Commands::List => list(&shortener(&pool, &config), &config.base_url).await?,
        Commands::Stats { code } => stats(&shortener(&pool, &config), &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn shortener(pool: &PgPool, config: &Config) -> ShortenerService {
    server::build_shortener(Arc::new(PgMappingStore::new(Arc::new(pool.clone()))), config)
}

async fn encode(service: &ShortenerService, base_url: &str, url: &str) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let record = service
        .encode(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("  Original: {}", record.original_url.cyan());
    println!(
        "  Short:    {}",
        short_link(base_url, &record.code).bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Lists all short links in insertion order.
///
/// # Output Format
///
/// ```text
/// 📋 Short Links
///
///   Code       Visits   Created            Original URL
///   ──────────────────────────────────────────────────────────────
///   Ab3dE9xY   12       2025-03-01 10:30   https://example.com/a
/// ```
async fn list(service: &ShortenerService, base_url: &str) -> Result<()> {
    println!("{}", "📋 Short Links".bright_blue().bold());
    println!();

    let records = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list short links: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No short links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin encode <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<16} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<16} {:<8} {:<18} {}",
            record.code.cyan(),
            record.visit_count.to_string().bright_green(),
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            record.original_url
        );
    }

    println!();
    println!(
        "  Total: {}  (links under {})",
        records.len().to_string().bright_white().bold(),
        base_url.bright_black()
    );
    println!();

    Ok(())
}

async fn stats(service: &ShortenerService, input: &str) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let code = extract_code(input).context("Short URL must not be empty")?;

    let stats = service
        .get_statistics(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:    {}", code.cyan());
    println!(
        "  Visits:  {}",
        stats.visit_count.to_string().bright_green().bold()
    );
    println!(
        "  Created: {}",
        stats.created_at.to_rfc3339().bright_black()
    );
    println!();

    Ok(())
}

/// Handles database maintenance commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_records")
                .fetch_one(pool)
                .await
                .context("Failed to count url_records")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Short links stored: {}",
                records.to_string().bright_white()
            );
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run database migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = false)]
    #[ignore = "requires PostgreSQL"]
    async fn test_db_check_fails_without_schema(pool: PgPool) {
        let result = handle_db_action(DbAction::Check, &pool).await;

        let error = result.unwrap_err();
        assert!(error.to_string().contains("Failed to count url_records"));
    }

    #[sqlx::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_db_check_after_migrations(pool: PgPool) {
        handle_db_action(DbAction::Check, &pool).await.unwrap();
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "requires PostgreSQL"]
    async fn test_db_migrate_then_check(pool: PgPool) {
        handle_db_action(DbAction::Migrate, &pool).await.unwrap();
        handle_db_action(DbAction::Check, &pool).await.unwrap();
    }
}
