//! Ls command implementation

use anyhow::Result;
use marv_core::Driver;
use serde::Serialize;
use std::collections::HashSet;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::{build_driver, migrations_dir, scan_options};

/// One row of ls output
#[derive(Debug, Serialize)]
struct LsRow {
    level: u64,
    comment: String,
    namespace: String,
    filename: String,
    applied: bool,
}

/// Execute the ls command
pub async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let directory = migrations_dir(global);
    let options = scan_options(args.namespace.as_deref(), args.filter.as_deref());
    let migrations = marv_core::scan(&directory, options)?;

    let driver = build_driver(global);
    driver.connect().await?;
    driver.ensure_migrations().await?;
    let applied = driver.get_migrations().await;
    let disconnected = driver.disconnect().await;
    let applied = applied?;
    disconnected?;

    let applied_keys: HashSet<(String, u64)> = applied
        .iter()
        .map(|a| (a.namespace.clone(), a.level))
        .collect();

    let mut rows: Vec<LsRow> = migrations
        .iter()
        .map(|m| {
            let namespace = m.namespace_or_default().to_string();
            LsRow {
                level: m.level,
                comment: m.comment.clone(),
                filename: m.filename.clone(),
                applied: applied_keys.contains(&(namespace.clone(), m.level)),
                namespace,
            }
        })
        .collect();
    rows.sort_by(|a, b| (&a.namespace, a.level).cmp(&(&b.namespace, b.level)));

    match args.output {
        LsOutput::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        LsOutput::Table => {
            println!(
                "{:<8} {:<10} {:<20} {}",
                "level", "status", "namespace", "comment"
            );
            for row in &rows {
                println!(
                    "{:<8} {:<10} {:<20} {}",
                    row.level,
                    if row.applied { "applied" } else { "pending" },
                    row.namespace,
                    row.comment
                );
            }
        }
    }

    Ok(())
}
