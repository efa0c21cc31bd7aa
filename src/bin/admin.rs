//! CLI administration tool for url-shortener.
//!
//! Works directly against the SQLite store, without going through the HTTP
//! API or its authentication.
//!
//! # Usage
//!
//! ```bash
//! # Check that the storage file opens and answers queries
//! cargo run --bin admin -- db check
//!
//! # Create the table and alias index
//! cargo run --bin admin -- db init
//!
//! # Store a URL (alias generated when omitted)
//! cargo run --bin admin -- url add https://example.com --alias docs
//!
//! # Look up an alias
//! cargo run --bin admin -- url get docs
//! ```
//!
//! # Environment Variables
//!
//! - `STORAGE_PATH` (required): SQLite database file
//! - `ALIAS_LENGTH` (optional): length of generated aliases (default: 6)

use url_shortener::api::dto::save::{ALIAS_REGEX, MAX_ALIAS_LENGTH};
use url_shortener::domain::repositories::{StorageProbe, UrlDeleter, UrlSaver};
use url_shortener::error::StoreError;
use url_shortener::infrastructure::persistence::{self, PoolSettings, SqliteUrlRepository};
use url_shortener::utils::alias_generator::{DEFAULT_ALIAS_LENGTH, generate_alias};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
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
    /// Manage stored URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// URL management subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Store a URL under an alias
    Add {
        /// Target URL
        url: String,

        /// Alias to use (generated if not provided)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the mapping stored for an alias
    Get {
        alias: String,
    },

    /// Delete the mapping stored for an alias
    Delete {
        alias: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the table and index if missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let storage_path = std::env::var("STORAGE_PATH").context("STORAGE_PATH must be set")?;

    let pool = persistence::connect(&storage_path, PoolSettings::default())
        .await
        .context("Failed to open storage")?;

    let repo = SqliteUrlRepository::new(Arc::new(pool));

    match cli.command {
        Commands::Url { action } => handle_url_action(action, &repo).await?,
        Commands::Db { action } => handle_db_action(action, &repo).await?,
    }

    Ok(())
}

/// Dispatches URL management commands.
async fn handle_url_action(action: UrlAction, repo: &SqliteUrlRepository) -> Result<()> {
    match action {
        UrlAction::Add { url, alias } => add_url(repo, url, alias).await,
        UrlAction::Get { alias } => get_url(repo, &alias).await,
        UrlAction::Delete { alias } => delete_url(repo, &alias).await,
    }
}

/// Validates and stores a URL, printing the alias it was stored under.
async fn add_url(repo: &SqliteUrlRepository, url: String, alias: Option<String>) -> Result<()> {
    if let Err(e) = validate_url(&url) {
        println!("{} {}", "Invalid URL:".red().bold(), e);
        return Ok(());
    }

    let alias = match alias.filter(|a| !a.is_empty()) {
        Some(a) => a,
        None => generate_alias(alias_length()),
    };

    if !is_valid_alias(&alias) {
        println!(
            "{} '{}' must be 1-{} letters, digits, '-' or '_'",
            "Invalid alias:".red().bold(),
            alias,
            MAX_ALIAS_LENGTH
        );
        return Ok(());
    }

    repo.ensure_schema().await?;

    match repo.save_url(&url, &alias).await {
        Ok(id) => {
            println!("{}", "URL stored".green().bold());
            println!("  ID:    {}", id.to_string().dimmed());
            println!("  Alias: {}", alias.bright_yellow().bold());
            println!("  URL:   {}", url.cyan());
        }
        Err(StoreError::AliasExists) => {
            println!(
                "{} alias '{}' is already taken",
                "Error:".red().bold(),
                alias
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Prints the mapping stored for an alias.
async fn get_url(repo: &SqliteUrlRepository, alias: &str) -> Result<()> {
    match repo.find_by_alias(alias).await {
        Ok(mapping) => {
            println!("{}", "Mapping:".bright_white().bold());
            println!("  ID:    {}", mapping.id.to_string().dimmed());
            println!("  Alias: {}", mapping.alias.bright_yellow());
            println!("  URL:   {}", mapping.url.cyan());
        }
        Err(StoreError::NotFound) => {
            println!("{} no url stored for '{}'", "Not found:".yellow(), alias);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

async fn delete_url(repo: &SqliteUrlRepository, alias: &str) -> Result<()> {
    match repo.delete_url(alias).await {
        Ok(()) => println!("{} '{}'", "Deleted".green().bold(), alias),
        Err(StoreError::Unimplemented { .. }) => {
            println!("{}", "Deleting urls is not supported yet".yellow());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Dispatches database operation commands.
async fn handle_db_action(action: DbAction, repo: &SqliteUrlRepository) -> Result<()> {
    match action {
        DbAction::Check => match repo.ping().await {
            Ok(()) => println!("{}", "Storage connection OK".green().bold()),
            Err(e) => {
                println!("{} {}", "Storage connection failed:".red().bold(), e);
            }
        },
        DbAction::Init => {
            repo.ensure_schema().await?;
            println!("{}", "Schema ready".green().bold());
        }
    }

    Ok(())
}

fn alias_length() -> usize {
    std::env::var("ALIAS_LENGTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|len| (1..=64).contains(len))
        .unwrap_or(DEFAULT_ALIAS_LENGTH)
}

fn is_valid_alias(alias: &str) -> bool {
    alias.len() as u64 <= MAX_ALIAS_LENGTH && ALIAS_REGEX.is_match(alias)
}

/// Same rule the HTTP API applies: the URL must parse as an absolute URL.
fn validate_url(url: &str) -> Result<(), String> {
    if validator::ValidateUrl::validate_url(&url) {
        Ok(())
    } else {
        Err(format!("'{}' is not a valid URL", url))
    }
}
