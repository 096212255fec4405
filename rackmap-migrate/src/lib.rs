//! rackmap-migrate - Administrative data migrations for the rackmap inventory
//!
//! Converts legacy denormalized site fields into normalized relational
//! records:
//! - `site-contacts`: free-text contact fields become Contact records plus
//!   ContactAssignment join records
//! - `site-asns`: the legacy single-value ASN field becomes an ASN record
//!   plus a row in the site_asns relation
//!
//! Runs are dry-run by default; the run controller in `main` wraps each
//! migration in a transaction and rolls it back unless `--commit` is given.

pub mod db;
pub mod scripts;
