//! Drop command implementation

use anyhow::Result;

use crate::cli::{DropArgs, GlobalArgs};
use crate::commands::common::build_driver;

/// Execute the drop command
pub async fn execute(args: &DropArgs, global: &GlobalArgs) -> Result<()> {
    if !args.yes {
        println!(
            "This removes the '{}' history table from {}.",
            global.table, global.database
        );
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }

    let driver = build_driver(global);
    marv_core::drop(&driver).await?;

    println!(
        "Dropped history table '{}' from {}",
        global.table, global.database
    );
    Ok(())
}
