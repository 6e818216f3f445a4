//! CLI administration tool for shortlink.
//!
//! Inspects and creates short URLs directly against PostgreSQL, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show statistics
//! cargo run --bin admin -- stats
//!
//! # List the newest URLs
//! cargo run --bin admin -- url list --limit 20
//!
//! # Show one URL
//! cargo run --bin admin -- url show aB3xY9
//!
//! # Create a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- url create https://example.com --code promo2025
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components), `BASE_URL`,
//! `SHORT_CODE_LENGTH`, `CODE_STRATEGY`, `MAX_CODE_ATTEMPTS`.

use shortlink::application::services::{ShortenedUrl, UrlService};
use shortlink::config::{self, StorageBackend};
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgUrlRepository;
use shortlink::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short URL subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// List short URLs, newest first
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: u32,

        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },

    /// Show one short URL
    Show {
        /// Short code to look up
        code: String,
    },

    /// Create a short URL
    Create {
        /// Destination URL (prompted for when omitted)
        url: Option<String>,

        /// Custom short code (generated when omitted)
        #[arg(short, long)]
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show server version
    Check,
}

type PgUrlService = UrlService<PgUrlRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("The admin tool works against PostgreSQL; unset STORAGE_BACKEND=memory");
    }

    let pool = connect_pool(&config).await?;
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    let service = UrlService::new(repository, config.shortener_settings());

    match cli.command {
        Commands::Url { action } => handle_url_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches short URL commands.
async fn handle_url_action(action: UrlAction, service: &PgUrlService) -> Result<()> {
    match action {
        UrlAction::List { limit, offset } => list_urls(service, limit, offset).await,
        UrlAction::Show { code } => show_url(service, &code).await,
        UrlAction::Create { url, code, yes } => create_url(service, url, code, yes).await,
    }
}

/// Lists short URLs as a table.
///
/// ```text
/// 🔗 Short URLs
///
///   ID    Code        Created            Original URL
///   ─────────────────────────────────────────────────────────────
///   12    aB3xY9      2025-03-01 10:30   https://example.com/page
/// ```
async fn list_urls(service: &PgUrlService, limit: u32, offset: u32) -> Result<()> {
    println!("{}", "🔗 Short URLs".bright_blue().bold());
    println!();

    let page = service.list_urls(limit, offset).await.map_err(describe)?;

    if page.urls.is_empty() {
        println!("{}", "  No URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<11} {:<18} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for item in &page.urls {
        println!(
            "  {:<5} {:<11} {:<18} {}",
            item.record.id.to_string().bright_black(),
            item.record.short_code.cyan(),
            item.record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            item.record.original_url
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        page.urls.len().to_string().bright_white().bold(),
        page.total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints one short URL.
async fn show_url(service: &PgUrlService, code: &str) -> Result<()> {
    let found = service.get_by_code(code).await.map_err(describe)?;
    print_url(&found);
    Ok(())
}

/// Creates a short URL with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the destination URL (or use provided)
/// 2. Show what will be created
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Create through the same service the HTTP API uses
async fn create_url(
    service: &PgUrlService,
    url: Option<String>,
    code: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✨ Create Short URL".bright_blue().bold());
    println!();

    let original_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Destination URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!("  URL:  {}", original_url.cyan());
    match &code {
        Some(c) => println!("  Code: {}", c.bright_yellow()),
        None => println!("  Code: {}", "(generated)".bright_black()),
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this short URL?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let created = service
        .create_short_url(&original_url, code)
        .await
        .map_err(describe)?;

    println!("{}", "✅ Short URL created".green().bold());
    println!();
    print_url(&created);

    Ok(())
}

fn print_url(item: &ShortenedUrl) {
    println!("  ID:        {}", item.record.id.to_string().bright_black());
    println!("  Code:      {}", item.record.short_code.cyan());
    println!("  Short URL: {}", item.short_url.bright_yellow().bold());
    println!("  Original:  {}", item.record.original_url);
    println!(
        "  Created:   {}",
        item.record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
}

/// Displays the total number of stored URLs.
async fn handle_stats(service: &PgUrlService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total = service.count().await.map_err(describe)?;

    println!("  URLs: {}", total.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await
                .context("Database query failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Turns a service error into a CLI error with its code and details.
fn describe(e: AppError) -> anyhow::Error {
    let info = e.to_error_info();
    anyhow::anyhow!("{} ({}): {}", info.message, info.code, info.details)
}
