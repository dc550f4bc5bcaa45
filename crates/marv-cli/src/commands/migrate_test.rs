use super::*;
use std::fs;
use std::path::Path;

fn global_for(directory: &Path, database: &str) -> GlobalArgs {
    GlobalArgs {
        directory: directory.display().to_string(),
        database: database.to_string(),
        table: "migrations".to_string(),
    }
}

#[tokio::test]
async fn test_migrate_applies_scanned_migrations() {
    let migrations_dir = tempfile::tempdir().unwrap();
    fs::write(
        migrations_dir.path().join("001.create-widgets.sql"),
        "CREATE TABLE widgets (id INTEGER);",
    )
    .unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("marv.duckdb");

    let args = MigrateArgs {
        namespace: None,
        filter: None,
        quiet: false,
    };
    let global = global_for(migrations_dir.path(), db_path.to_str().unwrap());

    execute(&args, &global).await.unwrap();
    // a second pass finds nothing left to apply
    execute(&args, &global).await.unwrap();
}

#[tokio::test]
async fn test_migrate_with_an_empty_directory_is_a_no_op() {
    let migrations_dir = tempfile::tempdir().unwrap();
    let args = MigrateArgs {
        namespace: None,
        filter: None,
        quiet: false,
    };
    let global = global_for(migrations_dir.path(), ":memory:");

    execute(&args, &global).await.unwrap();
}

#[tokio::test]
async fn test_migrate_surfaces_scan_failures() {
    let migrations_dir = tempfile::tempdir().unwrap();
    fs::write(migrations_dir.path().join("001.one.sql"), "SELECT 1;").unwrap();
    fs::write(migrations_dir.path().join("001.dupe.sql"), "SELECT 1;").unwrap();

    let args = MigrateArgs {
        namespace: None,
        filter: None,
        quiet: false,
    };
    let global = global_for(migrations_dir.path(), ":memory:");

    let err = execute(&args, &global).await.unwrap_err();
    assert!(err.to_string().contains("duplicate levels"));
}
