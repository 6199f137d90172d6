//! CLI administration tool for the petclinic database.
//!
//! Provides commands for inspecting and maintaining clinic data without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Row counts per table
//! cargo run --bin admin -- db info
//!
//! # List owners, optionally by last-name prefix
//! cargo run --bin admin -- owners list --last-name Dav
//!
//! # Delete an owner with pets and visits
//! cargo run --bin admin -- owners delete 4
//!
//! # List vets with specialties
//! cargo run --bin admin -- vets list
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use petclinic::config::Config;
use petclinic::domain::pagination::PageRequest;
use petclinic::domain::repositories::{OwnerRepository, VetRepository};
use petclinic::infrastructure::persistence::{PgOwnerRepository, PgVetRepository};
use petclinic::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

const LIST_LIMIT: u32 = 1000;

/// CLI tool for managing the petclinic database.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Owner maintenance
    Owners {
        #[command(subcommand)]
        action: OwnerAction,
    },

    /// Vet roster
    Vets {
        #[command(subcommand)]
        action: VetAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info and row counts
    Info,
}

/// Owner subcommands.
#[derive(Subcommand)]
enum OwnerAction {
    /// List owners ordered by last name
    List {
        /// Only owners whose last name starts with this prefix (case-sensitive)
        #[arg(short, long)]
        last_name: Option<String>,
    },

    /// Delete an owner together with pets and visits
    Delete {
        /// Owner id
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Vet subcommands.
#[derive(Subcommand)]
enum VetAction {
    /// List vets with their specialties
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Owners { action } => handle_owner_action(action, &pool).await?,
        Commands::Vets { action } => handle_vet_action(action, &pool).await?,
    }

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

            for (label, table) in [
                ("Owners", "owners"),
                ("Pets", "pets"),
                ("Visits", "visits"),
                ("Vets", "vets"),
                ("Pet types", "types"),
            ] {
                let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await
                    .with_context(|| format!("Failed to count {table}"))?;

                println!(
                    "  {:<10} {}",
                    format!("{label}:"),
                    count.to_string().bright_green().bold()
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Dispatches owner commands.
async fn handle_owner_action(action: OwnerAction, pool: &PgPool) -> Result<()> {
    let repo = PgOwnerRepository::new(Arc::new(pool.clone()));

    match action {
        OwnerAction::List { last_name } => list_owners(&repo, last_name).await,
        OwnerAction::Delete { id, yes } => delete_owner(&repo, id, yes).await,
    }
}

/// Lists owners with their pets.
///
/// # Output Format
///
/// ```text
/// 📋 Owners
///
///   ID  Name                      City            Telephone    Pets
///   ─────────────────────────────────────────────────────────────────────
///   2   Betty Davis               Sun Prairie     6085551749   Basil
/// ```
async fn list_owners(repo: &PgOwnerRepository, last_name: Option<String>) -> Result<()> {
    println!("{}", "📋 Owners".bright_blue().bold());
    println!();

    let prefix = last_name.unwrap_or_default();
    let page = repo
        .find_by_last_name_prefix(&prefix, PageRequest::new(1, LIST_LIMIT))
        .await
        .context("Failed to list owners")?;

    if page.items.is_empty() {
        println!("{}", "  No owners found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<25} {:<15} {:<12} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "City".bright_white().bold(),
        "Telephone".bright_white().bold(),
        "Pets".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for owner in &page.items {
        let pets: Vec<&str> = owner.pets().iter().map(|p| p.name.as_str()).collect();
        println!(
            "  {:<4} {:<25} {:<15} {:<12} {}",
            owner
                .id()
                .map(|id| id.to_string())
                .unwrap_or_default()
                .bright_black(),
            format!("{} {}", owner.first_name, owner.last_name).cyan(),
            owner.city,
            owner.telephone,
            pets.join(", ")
        );
    }

    println!();
    println!(
        "  Total: {}",
        page.total_items.to_string().bright_white().bold()
    );
    if page.total_items > i64::from(LIST_LIMIT) {
        println!(
            "  {}",
            format!("Showing the first {LIST_LIMIT}; narrow with --last-name").yellow()
        );
    }
    println!();

    Ok(())
}

/// Deletes an owner after confirmation (default: No).
async fn delete_owner(repo: &PgOwnerRepository, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Owner".bright_blue().bold());
    println!();

    let owner = repo
        .find_by_id(id)
        .await
        .context("Failed to load owner")?
        .with_context(|| format!("Owner {id} not found"))?;

    let visits: usize = owner.pets().iter().map(|p| p.visits().len()).sum();
    println!(
        "  Owner:  {}",
        format!("{} {}", owner.first_name, owner.last_name).cyan()
    );
    println!("  Pets:   {}", owner.pets().len());
    println!("  Visits: {}", visits);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this owner with all pets and visits?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.delete_by_id(id)
        .await
        .context("Failed to delete owner")?;

    println!();
    println!("{}", "✅ Owner deleted".green().bold());
    println!();

    Ok(())
}

/// Dispatches vet commands.
async fn handle_vet_action(action: VetAction, pool: &PgPool) -> Result<()> {
    let repo = PgVetRepository::new(Arc::new(pool.clone()));

    match action {
        VetAction::List => {
            println!("{}", "🩺 Vets".bright_blue().bold());
            println!();

            let vets = repo.find_all().await.context("Failed to list vets")?;
            for vet in &vets {
                let specialties: Vec<&str> =
                    vet.specialties().iter().map(|s| s.name.as_str()).collect();
                let specialties = if specialties.is_empty() {
                    "none".bright_black().to_string()
                } else {
                    specialties.join(", ")
                };

                println!(
                    "  {:<25} {}",
                    format!("{} {}", vet.first_name, vet.last_name).cyan(),
                    specialties
                );
            }

            println!();
            println!("  Total: {}", vets.len().to_string().bright_white().bold());
            println!();
        }
    }

    Ok(())
}
