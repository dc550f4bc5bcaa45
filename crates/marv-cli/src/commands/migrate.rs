//! Migrate command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{build_driver, migrations_dir, scan_options};

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let directory = migrations_dir(global);
    let options = scan_options(args.namespace.as_deref(), args.filter.as_deref());
    let migrations = marv_core::scan(&directory, options)?;

    if migrations.is_empty() {
        println!("No migrations found in {}", directory.display());
        return Ok(());
    }

    let driver = build_driver(global);
    let report = marv_core::migrate(
        &migrations,
        &driver,
        &marv_core::MigrateOptions { quiet: args.quiet },
    )
    .await?;

    for warning in &report.warnings {
        eprintln!("[warn] {}", warning);
    }

    if report.executed.is_empty() {
        println!(
            "Nothing to migrate ({} migration{} up to date)",
            migrations.len(),
            if migrations.len() == 1 { "" } else { "s" }
        );
        return Ok(());
    }

    for executed in &report.executed {
        println!(
            "  \u{2713} {:03} {} (namespace: {})",
            executed.level, executed.comment, executed.namespace
        );
    }
    println!();
    println!(
        "Applied {} migration{}",
        report.executed.len(),
        if report.executed.len() == 1 { "" } else { "s" }
    );

    Ok(())
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
