//! RIR (regional internet registry) lookups

use anyhow::Result;
use rackmap_common::db::models::Rir;
use sqlx::{Row, SqlitePool};

/// Load a RIR by slug
pub async fn load_rir_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Rir>> {
    let row = sqlx::query(
        r#"
        SELECT guid, name, slug, is_private
        FROM rirs
        WHERE slug = ?
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Rir {
        guid: row.get("guid"),
        name: row.get("name"),
        slug: row.get("slug"),
        is_private: row.get::<i64, _>("is_private") != 0,
    }))
}
