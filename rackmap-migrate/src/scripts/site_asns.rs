//! Migrate legacy site ASN fields to ASN objects
//!
//! Looks for sites which have a legacy ASN set, and creates or assigns an
//! ASN object in its place. Sites already linked to the matching ASN are
//! skipped.

use super::RunTotals;
use crate::db::{asns, sites};
use anyhow::Result;
use rackmap_common::db::models::Rir;
use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

/// Parameters for the site-asns migration
#[derive(Debug, Clone)]
pub struct SiteAsnsParams {
    /// RIR to assign to newly created ASNs
    pub rir: Rir,
    /// Clear legacy site ASN field after migration
    pub clear_site_field: bool,
}

/// Create or assign ASN objects from legacy site ASN fields
pub async fn run(conn: &mut SqliteConnection, params: &SiteAsnsParams) -> Result<RunTotals> {
    let mut totals = RunTotals::default();

    // Find all sites with a legacy ASN value assigned
    let selected = sites::load_sites_with_legacy_asn(conn).await?;
    if selected.is_empty() {
        warn!("No sites found with a legacy ASN defined; aborting.");
        return Ok(totals);
    }
    info!("Found {} sites with a legacy ASN defined.", selected.len());

    for site in &selected {
        // Selector guarantees the field is set
        let Some(number) = site.asn else { continue };

        let (asn, freshly_created) = match asns::load_asn_by_number(conn, number).await? {
            Some(existing) => (existing, false),
            None => {
                // Create a new ASN object if this AS number is new
                info!("✓ Creating new ASN: {}", number);
                let asn = asns::new_asn(number, &params.rir.guid);
                asns::save_asn(conn, &asn).await?;
                totals.created += 1;
                (asn, true)
            }
        };

        // A reused ASN may already be assigned to this site
        if !freshly_created && asns::site_link_exists(conn, &site.guid, &asn.guid).await? {
            info!(
                "Skipping ASN {} for site {}; already assigned",
                asn.asn, site.name
            );
            continue;
        }

        // Assign the ASN to the site
        info!("✓ Assigning ASN {} to site {}", asn.asn, site.name);
        asns::link_site_to_asn(conn, &site.guid, &asn.guid).await?;
        totals.linked += 1;

        // Clear legacy ASN field on the site (if enabled)
        if params.clear_site_field {
            debug!("Clearing legacy ASN field for site {}", site.name);
            sites::clear_legacy_asn_field(conn, &site.guid).await?;
        }
    }

    info!("✓ Created {} ASNs", totals.created);
    info!("✓ Assigned {} ASNs to sites", totals.linked);

    Ok(totals)
}
