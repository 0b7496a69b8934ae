//! CLI administration tool for slugly.
//!
//! Creates and inspects mappings directly against the database, without going
//! through the HTTP API. Mappings created here obey the same slug and URL rules.
//!
//! # Usage
//!
//! ```bash
//! # Create a mapping (slug is generated when omitted)
//! cargo run --bin admin -- mapping create --url https://example.com --slug docs
//!
//! # Show where a slug points
//! cargo run --bin admin -- mapping show docs
//!
//! # List the latest mappings
//! cargo run --bin admin -- mapping list --limit 20
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the server (`DATABASE_URL` or `DB_*` components).

use slugly::application::services::MappingService;
use slugly::config::{self, Config};
use slugly::error::AppError;
use slugly::infrastructure::persistence::PgMappingRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

type Service = MappingService<PgMappingRepository>;

/// CLI tool for managing slugly.
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
    /// Manage slug mappings
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Mapping subcommands.
#[derive(Subcommand)]
enum MappingAction {
    /// Create a new mapping
    Create {
        /// Target URL
        #[arg(short, long)]
        url: String,

        /// Slug to use (generated if omitted)
        #[arg(short, long)]
        slug: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the URL a slug points to
    Show {
        /// Slug to look up (case-insensitive)
        slug: String,
    },

    /// List the most recent mappings
    List {
        /// Number of mappings to show
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                config::mask_connection_string(&config.database_url)
            )
        })?;

    let service = MappingService::new(Arc::new(PgMappingRepository::with_timeout(
        Arc::new(pool.clone()),
        config.store_timeout(),
    )));

    match cli.command {
        Commands::Mapping { action } => handle_mapping_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches mapping commands.
async fn handle_mapping_action(action: MappingAction, service: &Service) -> Result<()> {
    match action {
        MappingAction::Create { url, slug, yes } => create_mapping(service, url, slug, yes).await,
        MappingAction::Show { slug } => show_mapping(service, &slug).await,
        MappingAction::List { limit } => list_mappings(service, limit).await,
    }
}

/// Creates a mapping after an optional confirmation.
async fn create_mapping(
    service: &Service,
    url: String,
    slug: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create mapping".bright_blue().bold());
    println!();
    println!("  URL:  {}", url.cyan());
    println!(
        "  Slug: {}",
        slug.as_deref()
            .map(|s| s.cyan())
            .unwrap_or_else(|| "(generated)".bright_black())
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this mapping?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let mapping = service
        .create_mapping(url, slug)
        .await
        .map_err(describe)
        .context("Failed to create mapping")?;

    println!("{}", "✅ Mapping created".green().bold());
    println!("  ID:   {}", mapping.id.to_string().bright_black());
    println!("  Slug: {}", mapping.slug.bright_yellow().bold());
    println!("  URL:  {}", mapping.url.cyan());
    println!();

    Ok(())
}

/// Prints the target of a single slug.
async fn show_mapping(service: &Service, slug: &str) -> Result<()> {
    match service.resolve(slug).await {
        Ok(mapping) => {
            println!("  {} → {}", mapping.slug.bright_yellow(), mapping.url.cyan());
            println!(
                "  Created: {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  No mapping for '{slug}'").yellow());
        }
        Err(e) => return Err(describe(e)).context("Lookup failed"),
    }

    Ok(())
}

/// Lists recent mappings in a table.
///
/// # Output Format
///
/// ```text
///   ID     Slug         Created            URL
///   ──────────────────────────────────────────────────────────
///   12     docs         2025-01-15 10:30   https://docs.rs
/// ```
async fn list_mappings(service: &Service, limit: i64) -> Result<()> {
    println!("{}", "📋 Recent mappings".bright_blue().bold());
    println!();

    let mappings = service
        .recent(limit)
        .await
        .map_err(describe)
        .context("Failed to list mappings")?;

    if mappings.is_empty() {
        println!("{}", "  No mappings found".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:<12} {:<18} {}",
        "ID".bright_white().bold(),
        "Slug".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<6} {:<12} {:<18} {}",
            mapping.id.to_string().bright_black(),
            mapping.slug.bright_yellow(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.url.cyan()
        );
    }

    println!();

    Ok(())
}

/// Displays the number of stored mappings.
async fn handle_stats(service: &Service) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let count = service
        .count()
        .await
        .map_err(describe)
        .context("Failed to count mappings")?;

    println!("  Mappings: {}", count.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations").run(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

/// Turns an [`AppError`] into an `anyhow` error that keeps its diagnostic.
fn describe(e: AppError) -> anyhow::Error {
    anyhow::anyhow!(e.diagnostic())
}
