//! Database initialization
//!
//! Opens (or creates) the inventory database and ensures the tables the
//! administrative tools touch exist. All CREATE statements are idempotent,
//! so pointing this at an existing application database is safe.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // Set busy timeout so concurrent application writes don't surface as
    // immediate lock errors
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_inventory_tables(&pool).await?;

    Ok(pool)
}

/// Create all inventory tables touched by the migration tools
///
/// Idempotent; used both at startup and by tests bootstrapping an
/// in-memory database.
pub async fn create_inventory_tables(pool: &SqlitePool) -> Result<()> {
    create_sites_table(pool).await?;
    create_contact_roles_table(pool).await?;
    create_contacts_table(pool).await?;
    create_contact_assignments_table(pool).await?;
    create_rirs_table(pool).await?;
    create_asns_table(pool).await?;
    create_site_asns_table(pool).await?;
    Ok(())
}

/// Create the sites table
///
/// Carries the legacy denormalized contact/ASN fields alongside the
/// normalized relations that replace them.
pub async fn create_sites_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sites (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            contact_name TEXT NOT NULL DEFAULT '',
            contact_phone TEXT NOT NULL DEFAULT '',
            contact_email TEXT NOT NULL DEFAULT '',
            asn INTEGER,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sites_slug ON sites(slug)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the contacts table
pub async fn create_contacts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_contacts_name ON contacts(name)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the contact_roles table
pub async fn create_contact_roles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_roles (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the contact_assignments table
///
/// The assignable side is polymorphic (object_type + object_id), so the
/// same join table serves sites, racks, devices, and future object types.
pub async fn create_contact_assignments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_assignments (
            guid TEXT PRIMARY KEY,
            object_type TEXT NOT NULL,
            object_id TEXT NOT NULL,
            contact_id TEXT NOT NULL REFERENCES contacts(guid),
            role_id TEXT NOT NULL REFERENCES contact_roles(guid),
            priority TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (object_type, object_id, contact_id, role_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_contact_assignments_object \
         ON contact_assignments(object_type, object_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the rirs table (regional internet registries)
pub async fn create_rirs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rirs (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            is_private INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the asns table
pub async fn create_asns_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS asns (
            guid TEXT PRIMARY KEY,
            asn INTEGER NOT NULL UNIQUE,
            rir_id TEXT NOT NULL REFERENCES rirs(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_asns_asn ON asns(asn)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the site_asns linking table
pub async fn create_site_asns_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS site_asns (
            site_id TEXT NOT NULL REFERENCES sites(guid),
            asn_id TEXT NOT NULL REFERENCES asns(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (site_id, asn_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
