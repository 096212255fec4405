//! Test helpers for migration integration tests
//!
//! Builds a temporary file-backed database with the inventory schema and
//! provides seed functions for the entities the migrations consume.

#![allow(dead_code)]

use rackmap_common::db::models::{ContactRole, Rir, Site};
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

/// Create temporary test database with the inventory schema applied
///
/// Returns (TempDir, SqlitePool) - TempDir must be kept alive for duration of test
pub async fn create_test_db() -> (TempDir, SqlitePool) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test_rackmap.db");

    let pool = rackmap_common::db::init_database(&db_path)
        .await
        .expect("Failed to initialize test database");

    (temp_dir, pool)
}

pub async fn seed_role(pool: &SqlitePool, slug: &str) -> ContactRole {
    let role = ContactRole {
        guid: Uuid::new_v4().to_string(),
        name: slug.to_uppercase(),
        slug: slug.to_string(),
    };
    sqlx::query("INSERT INTO contact_roles (guid, name, slug) VALUES (?, ?, ?)")
        .bind(&role.guid)
        .bind(&role.name)
        .bind(&role.slug)
        .execute(pool)
        .await
        .expect("Failed to seed contact role");
    role
}

pub async fn seed_rir(pool: &SqlitePool, slug: &str) -> Rir {
    let rir = Rir {
        guid: Uuid::new_v4().to_string(),
        name: slug.to_uppercase(),
        slug: slug.to_string(),
        is_private: false,
    };
    sqlx::query("INSERT INTO rirs (guid, name, slug, is_private) VALUES (?, ?, ?, 0)")
        .bind(&rir.guid)
        .bind(&rir.name)
        .bind(&rir.slug)
        .execute(pool)
        .await
        .expect("Failed to seed RIR");
    rir
}

/// Seed a site with the given legacy contact fields and legacy ASN
pub async fn seed_site(
    pool: &SqlitePool,
    slug: &str,
    contact: (&str, &str, &str),
    asn: Option<i64>,
) -> Site {
    let (contact_name, contact_phone, contact_email) = contact;
    let site = Site {
        guid: Uuid::new_v4().to_string(),
        name: slug.to_uppercase(),
        slug: slug.to_string(),
        contact_name: contact_name.to_string(),
        contact_phone: contact_phone.to_string(),
        contact_email: contact_email.to_string(),
        asn,
    };
    sqlx::query(
        "INSERT INTO sites (guid, name, slug, contact_name, contact_phone, contact_email, asn) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&site.guid)
    .bind(&site.name)
    .bind(&site.slug)
    .bind(&site.contact_name)
    .bind(&site.contact_phone)
    .bind(&site.contact_email)
    .bind(site.asn)
    .execute(pool)
    .await
    .expect("Failed to seed site");
    site
}

/// Seed a pre-existing contact, returning its guid
pub async fn seed_contact(pool: &SqlitePool, name: &str, phone: &str, email: &str) -> String {
    let guid = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO contacts (guid, name, phone, email) VALUES (?, ?, ?, ?)")
        .bind(&guid)
        .bind(name)
        .bind(phone)
        .bind(email)
        .execute(pool)
        .await
        .expect("Failed to seed contact");
    guid
}

/// Seed a pre-existing contact assignment for a site
pub async fn seed_assignment(pool: &SqlitePool, site_id: &str, contact_id: &str, role_id: &str) {
    sqlx::query(
        "INSERT INTO contact_assignments (guid, object_type, object_id, contact_id, role_id) \
         VALUES (?, 'site', ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(site_id)
    .bind(contact_id)
    .bind(role_id)
    .execute(pool)
    .await
    .expect("Failed to seed assignment");
}

/// Seed a pre-existing ASN record, returning its guid
pub async fn seed_asn(pool: &SqlitePool, number: i64, rir_id: &str) -> String {
    let guid = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO asns (guid, asn, rir_id) VALUES (?, ?, ?)")
        .bind(&guid)
        .bind(number)
        .bind(rir_id)
        .execute(pool)
        .await
        .expect("Failed to seed ASN");
    guid
}

/// Seed a pre-existing site/ASN link
pub async fn seed_site_asn_link(pool: &SqlitePool, site_id: &str, asn_id: &str) {
    sqlx::query("INSERT INTO site_asns (site_id, asn_id) VALUES (?, ?)")
        .bind(site_id)
        .bind(asn_id)
        .execute(pool)
        .await
        .expect("Failed to seed site/ASN link");
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

/// Reload a site's legacy fields as (contact_name, contact_phone, contact_email, asn)
pub async fn load_legacy_fields(
    pool: &SqlitePool,
    site_id: &str,
) -> (String, String, String, Option<i64>) {
    sqlx::query_as(
        "SELECT contact_name, contact_phone, contact_email, asn FROM sites WHERE guid = ?",
    )
    .bind(site_id)
    .fetch_one(pool)
    .await
    .expect("Failed to load site")
}
