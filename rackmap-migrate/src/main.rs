//! rackmap-migrate - Administrative data migrations for the rackmap inventory
//!
//! Scans sites for legacy denormalized fields and converts them into
//! normalized records plus join records. Dry-run by default: the whole run
//! executes inside a transaction that is rolled back unless --commit is
//! given, so the per-record logic and logging are exercised identically in
//! both modes.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rackmap_common::db::models::ContactPriority;
use rackmap_migrate::db::{rirs, roles};
use rackmap_migrate::scripts::{self, Migration, RunTotals};
use rackmap_migrate::scripts::site_asns::SiteAsnsParams;
use rackmap_migrate::scripts::site_contacts::SiteContactsParams;
use sqlx::SqlitePool;
use tracing::info;

#[derive(Parser)]
#[command(name = "rackmap-migrate")]
#[command(version)]
#[command(about = "Administrative data migrations for the rackmap inventory", long_about = None)]
struct Cli {
    /// Path to the rackmap database (overrides RACKMAP_DATABASE and config file)
    #[arg(long, value_name = "FILE", global = true)]
    database: Option<String>,

    /// Apply changes (default is a dry run that discards all writes)
    #[arg(long, global = true)]
    commit: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create new contact objects from legacy site contact fields
    SiteContacts {
        /// Slug of the role to apply when assigning contacts to sites
        #[arg(long, value_name = "SLUG")]
        role: String,

        /// Priority to apply when assigning contacts to sites
        /// (primary, secondary, tertiary, inactive)
        #[arg(long, value_name = "CHOICE")]
        priority: Option<ContactPriority>,

        /// Clear legacy site contact values after creating a new contact assignment
        #[arg(long)]
        clear_site_fields: bool,
    },
    /// Create/assign ASN objects from legacy site ASN fields
    SiteAsns {
        /// Slug of the RIR to assign to newly created ASNs
        #[arg(long, value_name = "SLUG")]
        rir: String,

        /// Clear legacy site ASN field after migration
        #[arg(long)]
        clear_site_field: bool,
    },
    /// List the available migrations
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting rackmap-migrate v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if matches!(cli.command, Commands::List) {
        for (name, description) in scripts::CATALOG {
            println!("{:<16} {}", name, description);
        }
        return Ok(());
    }

    let db_path =
        rackmap_common::config::resolve_database_path(cli.database.as_deref(), "RACKMAP_DATABASE")?;
    info!("Database: {}", db_path.display());
    let pool = rackmap_common::db::init_database(&db_path).await?;

    // Resolve parameter entities before the run; unknown slugs are fatal
    let migration = match cli.command {
        Commands::SiteContacts {
            role,
            priority,
            clear_site_fields,
        } => {
            let Some(role) = roles::load_role_by_slug(&pool, &role).await? else {
                bail!("No contact role found with slug '{}'", role);
            };
            Migration::SiteContacts(SiteContactsParams {
                role,
                priority,
                clear_site_fields,
            })
        }
        Commands::SiteAsns {
            rir,
            clear_site_field,
        } => {
            let Some(rir) = rirs::load_rir_by_slug(&pool, &rir).await? else {
                bail!("No RIR found with slug '{}'", rir);
            };
            Migration::SiteAsns(SiteAsnsParams {
                rir,
                clear_site_field,
            })
        }
        Commands::List => unreachable!(),
    };

    execute(&pool, cli.commit, migration).await?;

    Ok(())
}

/// Run a migration inside the appropriate transactional boundary
///
/// Commit mode runs on a plain pooled connection, so each statement commits
/// independently and a failure partway through leaves prior records'
/// writes intact. Dry-run wraps the whole run in a transaction and rolls it
/// back; the migration logic itself never branches on the mode.
async fn execute(pool: &SqlitePool, commit: bool, migration: Migration) -> Result<RunTotals> {
    if commit {
        let mut conn = pool.acquire().await?;
        migration.run(&mut conn).await
    } else {
        let mut tx = pool.begin().await?;
        let totals = migration.run(&mut tx).await?;
        tx.rollback().await?;
        info!("Dry run complete; database changes were discarded. Re-run with --commit to apply.");
        Ok(totals)
    }
}
