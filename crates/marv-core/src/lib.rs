//! marv-core - The Marv migration engine
//!
//! This crate scans a directory of migration scripts into proposed records,
//! computes the per-namespace delta against previously-applied history, and
//! drives execution through a pluggable storage `Driver` with a
//! connect/lock/execute/unlock/disconnect lifecycle.

pub mod checksum;
pub mod config;
pub mod directive;
pub mod driver;
pub mod drop;
pub mod error;
pub mod migrate;
pub mod migration;
pub mod scan;

pub use checksum::compute_checksum;
pub use config::{RcFile, ScanOptions, RC_FILENAME};
pub use directive::parse_directives;
pub use driver::{Driver, DriverError, DriverResult};
pub use drop::drop;
pub use error::{CoreError, CoreResult};
pub use migrate::{migrate, ExecutedMigration, MigrateOptions, MigrateReport};
pub use migration::{AppliedMigration, ExecutableMigration, Migration, DEFAULT_NAMESPACE};
pub use scan::scan;
