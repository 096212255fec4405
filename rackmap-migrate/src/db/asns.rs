//! ASN database operations
//!
//! Find-or-create support for ASN records plus the site_asns relation.

use anyhow::Result;
use rackmap_common::db::models::Asn;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

/// Build a new ASN record for the given AS number and RIR
pub fn new_asn(number: i64, rir_id: &str) -> Asn {
    Asn {
        guid: Uuid::new_v4().to_string(),
        asn: number,
        rir_id: rir_id.to_string(),
    }
}

/// Load an ASN record by AS number
pub async fn load_asn_by_number(conn: &mut SqliteConnection, number: i64) -> Result<Option<Asn>> {
    let row = sqlx::query(
        r#"
        SELECT guid, asn, rir_id
        FROM asns
        WHERE asn = ?
        "#,
    )
    .bind(number)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(|row| Asn {
        guid: row.get("guid"),
        asn: row.get("asn"),
        rir_id: row.get("rir_id"),
    }))
}

/// Save an ASN record to the database
pub async fn save_asn(conn: &mut SqliteConnection, asn: &Asn) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO asns (guid, asn, rir_id, created_at, updated_at)
        VALUES (?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(&asn.guid)
    .bind(asn.asn)
    .bind(&asn.rir_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Check whether this ASN is already assigned to this site
pub async fn site_link_exists(
    conn: &mut SqliteConnection,
    site_id: &str,
    asn_id: &str,
) -> Result<bool> {
    let row = sqlx::query(
        r#"
        SELECT 1 FROM site_asns
        WHERE site_id = ? AND asn_id = ?
        LIMIT 1
        "#,
    )
    .bind(site_id)
    .bind(asn_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.is_some())
}

/// Assign an ASN to a site
pub async fn link_site_to_asn(
    conn: &mut SqliteConnection,
    site_id: &str,
    asn_id: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO site_asns (site_id, asn_id, created_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(site_id)
    .bind(asn_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
