//! Contact role lookups

use anyhow::Result;
use rackmap_common::db::models::ContactRole;
use sqlx::{Row, SqlitePool};

/// Load a contact role by slug
pub async fn load_role_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<ContactRole>> {
    let row = sqlx::query(
        r#"
        SELECT guid, name, slug
        FROM contact_roles
        WHERE slug = ?
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| ContactRole {
        guid: row.get("guid"),
        name: row.get("name"),
        slug: row.get("slug"),
    }))
}
