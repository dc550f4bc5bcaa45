//! Shared helpers for command implementations

use crate::cli::GlobalArgs;
use marv_core::ScanOptions;
use marv_db::DuckDbDriver;
use std::path::PathBuf;

/// Build the DuckDB driver from global arguments
pub fn build_driver(global: &GlobalArgs) -> DuckDbDriver {
    DuckDbDriver::with_table(&global.database, &global.table)
}

/// Resolve the migrations directory from global arguments
pub fn migrations_dir(global: &GlobalArgs) -> PathBuf {
    PathBuf::from(&global.directory)
}

/// Build scan options from per-command overrides
pub fn scan_options(namespace: Option<&str>, filter: Option<&str>) -> ScanOptions {
    ScanOptions {
        filter: filter.map(String::from),
        namespace: namespace.map(String::from),
        ..ScanOptions::default()
    }
}
