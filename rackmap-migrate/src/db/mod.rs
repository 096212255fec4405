//! Database access for rackmap-migrate
//!
//! One module per inventory entity. Mutating functions take a
//! `&mut SqliteConnection` so the run controller can execute a whole
//! migration inside a transaction it later commits or rolls back.

pub mod asns;
pub mod contacts;
pub mod rirs;
pub mod roles;
pub mod sites;
