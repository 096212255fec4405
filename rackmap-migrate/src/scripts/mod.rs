//! Administrative migration scripts
//!
//! Each script is a single-purpose, sequential pass over the site table:
//! select sites with a legacy field, find-or-create the canonical record,
//! link it, optionally clear the legacy field. Operators are encouraged to
//! adapt these per environment rather than generalize them.

pub mod site_asns;
pub mod site_contacts;

use anyhow::Result;
use sqlx::SqliteConnection;

/// Totals accumulated over one migration run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunTotals {
    /// Canonical records created
    pub created: u64,
    /// Links/assignments created
    pub linked: u64,
}

/// One of the migrations shipped by this tool, with its parameters bound
#[derive(Debug, Clone)]
pub enum Migration {
    SiteContacts(site_contacts::SiteContactsParams),
    SiteAsns(site_asns::SiteAsnsParams),
}

impl Migration {
    /// Execute the migration against the given connection
    ///
    /// The caller owns the transactional boundary: pass a transaction's
    /// connection to get atomic apply/discard, or a plain pooled connection
    /// to commit each statement independently.
    pub async fn run(&self, conn: &mut SqliteConnection) -> Result<RunTotals> {
        match self {
            Migration::SiteContacts(params) => site_contacts::run(conn, params).await,
            Migration::SiteAsns(params) => site_asns::run(conn, params).await,
        }
    }
}

/// (name, description) of every migration, for `rackmap-migrate list`
pub const CATALOG: &[(&str, &str)] = &[
    (
        "site-contacts",
        "Create new contact objects from legacy site contact fields",
    ),
    (
        "site-asns",
        "Create/assign ASN objects from legacy site ASN fields",
    ),
];
