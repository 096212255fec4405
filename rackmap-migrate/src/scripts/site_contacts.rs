//! Migrate legacy site contact fields to contact objects
//!
//! Looks for sites with a contact_name defined and creates Contact records
//! from the associated data. A new Contact is created for each *unique* set
//! of name, phone, and email values. Sites whose contact already has an
//! assignment are skipped.

use super::RunTotals;
use crate::db::{contacts, contacts::ContactKey, sites};
use anyhow::Result;
use rackmap_common::db::models::{ContactPriority, ContactRole};
use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

/// Parameters for the site-contacts migration
#[derive(Debug, Clone)]
pub struct SiteContactsParams {
    /// Role to apply when assigning contacts to sites
    pub role: ContactRole,
    /// Priority to apply when assigning contacts to sites
    pub priority: Option<ContactPriority>,
    /// Clear legacy site contact values after creating a new assignment
    pub clear_site_fields: bool,
}

/// Create contact objects and assignments from legacy site contact fields
pub async fn run(conn: &mut SqliteConnection, params: &SiteContactsParams) -> Result<RunTotals> {
    let mut totals = RunTotals::default();

    // Retrieve all sites with contact_name defined
    let selected = sites::load_sites_with_legacy_contacts(conn).await?;
    if selected.is_empty() {
        warn!("No sites found with legacy contact information defined; aborting.");
        return Ok(totals);
    }
    info!(
        "Found {} sites with legacy contact information defined.",
        selected.len()
    );

    for site in &selected {
        // Extract the contact attributes from the site
        let key = ContactKey::from_site(site);

        let (contact, freshly_created) = match contacts::load_contact_by_key(conn, &key).await? {
            Some(existing) => (existing, false),
            None => {
                // Create a new contact if this combination of attributes is new
                info!("✓ Creating new contact: {}", key.name);
                let contact = key.to_contact();
                contacts::save_contact(conn, &contact).await?;
                totals.created += 1;
                (contact, true)
            }
        };

        // A reused contact may already be assigned to this site
        if !freshly_created && contacts::assignment_exists(conn, &site.guid, &contact.guid).await? {
            info!(
                "Skipping contact {} for site {}; assignment already exists",
                contact.name, site.name
            );
            continue;
        }

        // Assign the contact to the site
        info!("✓ Assigning contact {} to site {}", contact.name, site.name);
        contacts::save_assignment(
            conn,
            &site.guid,
            &contact.guid,
            &params.role.guid,
            params.priority,
        )
        .await?;
        totals.linked += 1;

        // Clear legacy contact fields on the site (if enabled)
        if params.clear_site_fields {
            debug!("Clearing legacy contact data for site {}", site.name);
            sites::clear_legacy_contact_fields(conn, &site.guid).await?;
        }
    }

    info!("✓ Created {} contacts", totals.created);
    info!("✓ Created {} contact assignments", totals.linked);

    Ok(totals)
}
