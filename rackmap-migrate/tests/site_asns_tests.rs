//! Integration tests for the site-asns migration

mod helpers;

use helpers::*;
use rackmap_common::db::models::Rir;
use rackmap_migrate::scripts::site_asns::{run, SiteAsnsParams};
use sqlx::SqlitePool;

fn params(rir: &Rir) -> SiteAsnsParams {
    SiteAsnsParams {
        rir: rir.clone(),
        clear_site_field: false,
    }
}

async fn run_migration(pool: &SqlitePool, params: &SiteAsnsParams) -> (u64, u64) {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let totals = run(&mut conn, params).await.expect("Migration failed");
    (totals.created, totals.linked)
}

#[tokio::test]
async fn creates_asn_and_link_from_legacy_field() {
    let (_tmp, pool) = create_test_db().await;
    let rir = seed_rir(&pool, "arin").await;
    let site = seed_site(&pool, "site-c", ("", "", ""), Some(65001)).await;

    let (created, linked) = run_migration(&pool, &params(&rir)).await;
    assert_eq!(created, 1);
    assert_eq!(linked, 1);

    let (number, rir_id): (i64, String) = sqlx::query_as("SELECT asn, rir_id FROM asns")
        .fetch_one(&pool)
        .await
        .expect("Expected one ASN");
    assert_eq!(number, 65001);
    assert_eq!(rir_id, rir.guid);

    let link_site: String = sqlx::query_scalar("SELECT site_id FROM site_asns")
        .fetch_one(&pool)
        .await
        .expect("Expected one link");
    assert_eq!(link_site, site.guid);
}

#[tokio::test]
async fn reuses_existing_asn_for_new_site() {
    let (_tmp, pool) = create_test_db().await;
    let rir = seed_rir(&pool, "arin").await;
    let other_site = seed_site(&pool, "site-a", ("", "", ""), None).await;
    let asn_id = seed_asn(&pool, 65001, &rir.guid).await;
    seed_site_asn_link(&pool, &other_site.guid, &asn_id).await;

    seed_site(&pool, "site-b", ("", "", ""), Some(65001)).await;

    let (created, linked) = run_migration(&pool, &params(&rir)).await;
    assert_eq!(created, 0);
    assert_eq!(linked, 1);

    assert_eq!(count_rows(&pool, "asns").await, 1);
    assert_eq!(count_rows(&pool, "site_asns").await, 2);
}

#[tokio::test]
async fn skips_site_already_linked_to_its_asn() {
    let (_tmp, pool) = create_test_db().await;
    let rir = seed_rir(&pool, "arin").await;
    let site = seed_site(&pool, "site-a", ("", "", ""), Some(65001)).await;
    let asn_id = seed_asn(&pool, 65001, &rir.guid).await;
    seed_site_asn_link(&pool, &site.guid, &asn_id).await;

    // Clear flag set, but the skip path must never clear the legacy field
    let migration_params = SiteAsnsParams {
        clear_site_field: true,
        ..params(&rir)
    };
    let (created, linked) = run_migration(&pool, &migration_params).await;
    assert_eq!(created, 0);
    assert_eq!(linked, 0);

    let (_, _, _, asn) = load_legacy_fields(&pool, &site.guid).await;
    assert_eq!(asn, Some(65001));
    assert_eq!(count_rows(&pool, "site_asns").await, 1);
}

#[tokio::test]
async fn empty_selection_is_a_noop() {
    let (_tmp, pool) = create_test_db().await;
    let rir = seed_rir(&pool, "arin").await;
    seed_site(&pool, "site-a", ("Jane Doe", "", ""), None).await;

    let (created, linked) = run_migration(&pool, &params(&rir)).await;
    assert_eq!(created, 0);
    assert_eq!(linked, 0);
    assert_eq!(count_rows(&pool, "asns").await, 0);
    assert_eq!(count_rows(&pool, "site_asns").await, 0);
}

#[tokio::test]
async fn second_run_is_idempotent() {
    let (_tmp, pool) = create_test_db().await;
    let rir = seed_rir(&pool, "arin").await;
    seed_site(&pool, "site-a", ("", "", ""), Some(65001)).await;
    // Two sites sharing one AS number: one ASN record, two links
    seed_site(&pool, "site-b", ("", "", ""), Some(65001)).await;

    let (created, linked) = run_migration(&pool, &params(&rir)).await;
    assert_eq!(created, 1);
    assert_eq!(linked, 2);

    let (created, linked) = run_migration(&pool, &params(&rir)).await;
    assert_eq!(created, 0);
    assert_eq!(linked, 0);

    assert_eq!(count_rows(&pool, "asns").await, 1);
    assert_eq!(count_rows(&pool, "site_asns").await, 2);
}

#[tokio::test]
async fn reused_asn_keeps_its_original_rir() {
    let (_tmp, pool) = create_test_db().await;
    let original_rir = seed_rir(&pool, "arin").await;
    let run_rir = seed_rir(&pool, "ripe").await;
    seed_asn(&pool, 65001, &original_rir.guid).await;
    seed_site(&pool, "site-a", ("", "", ""), Some(65001)).await;

    run_migration(&pool, &params(&run_rir)).await;

    let rir_id: String = sqlx::query_scalar("SELECT rir_id FROM asns WHERE asn = 65001")
        .fetch_one(&pool)
        .await
        .expect("ASN not found");
    assert_eq!(rir_id, original_rir.guid);
}

#[tokio::test]
async fn clear_flag_clears_legacy_asn_after_new_link() {
    let (_tmp, pool) = create_test_db().await;
    let rir = seed_rir(&pool, "arin").await;
    let site = seed_site(&pool, "site-a", ("", "", ""), Some(65001)).await;

    let migration_params = SiteAsnsParams {
        clear_site_field: true,
        ..params(&rir)
    };
    run_migration(&pool, &migration_params).await;

    let (_, _, _, asn) = load_legacy_fields(&pool, &site.guid).await;
    assert_eq!(asn, None);
}

#[tokio::test]
async fn dry_run_reports_totals_but_persists_nothing() {
    let (_tmp, pool) = create_test_db().await;
    let rir = seed_rir(&pool, "arin").await;
    seed_site(&pool, "site-a", ("", "", ""), Some(65001)).await;

    let mut tx = pool.begin().await.expect("Failed to begin transaction");
    let totals = run(&mut tx, &params(&rir)).await.expect("Migration failed");
    tx.rollback().await.expect("Rollback failed");

    assert_eq!(totals.created, 1);
    assert_eq!(totals.linked, 1);
    assert_eq!(count_rows(&pool, "asns").await, 0);
    assert_eq!(count_rows(&pool, "site_asns").await, 0);
}
