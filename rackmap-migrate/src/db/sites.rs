//! Site database operations
//!
//! Selector queries over the legacy denormalized fields, plus the targeted
//! updates that clear them after migration.

use anyhow::Result;
use rackmap_common::db::models::Site;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

fn site_from_row(row: &SqliteRow) -> Site {
    Site {
        guid: row.get("guid"),
        name: row.get("name"),
        slug: row.get("slug"),
        contact_name: row.get("contact_name"),
        contact_phone: row.get("contact_phone"),
        contact_email: row.get("contact_email"),
        asn: row.get("asn"),
    }
}

/// Load all sites with a legacy contact_name defined
pub async fn load_sites_with_legacy_contacts(conn: &mut SqliteConnection) -> Result<Vec<Site>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, name, slug, contact_name, contact_phone, contact_email, asn
        FROM sites
        WHERE contact_name <> ''
        ORDER BY name
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(site_from_row).collect())
}

/// Load all sites with a legacy ASN value assigned
pub async fn load_sites_with_legacy_asn(conn: &mut SqliteConnection) -> Result<Vec<Site>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, name, slug, contact_name, contact_phone, contact_email, asn
        FROM sites
        WHERE asn IS NOT NULL
        ORDER BY name
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(site_from_row).collect())
}

/// Clear the legacy contact fields on a site
///
/// Targeted update keyed on the site guid; does not touch any in-memory
/// copy of the row.
pub async fn clear_legacy_contact_fields(conn: &mut SqliteConnection, site_id: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE sites
        SET contact_name = '', contact_phone = '', contact_email = '',
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(site_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Clear the legacy ASN field on a site
pub async fn clear_legacy_asn_field(conn: &mut SqliteConnection, site_id: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE sites
        SET asn = NULL, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(site_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Insert a site row (test/bootstrap helper)
pub async fn save_site(conn: &mut SqliteConnection, site: &Site) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO sites (
            guid, name, slug, contact_name, contact_phone, contact_email, asn,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(&site.guid)
    .bind(&site.name)
    .bind(&site.slug)
    .bind(&site.contact_name)
    .bind(&site.contact_phone)
    .bind(&site.contact_email)
    .bind(site.asn)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
