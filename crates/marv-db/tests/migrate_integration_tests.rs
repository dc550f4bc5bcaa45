//! End-to-end tests: scan a directory of scripts and migrate it through the
//! DuckDB driver, twice, against a file-backed database.

use marv_core::{migrate, scan, Driver, MigrateOptions, ScanOptions};
use marv_db::DuckDbDriver;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_migration(dir: &Path, name: &str, script: &str) {
    fs::write(dir.join(name), script).unwrap();
}

fn scratch_database(dir: &TempDir) -> PathBuf {
    dir.path().join("marv.duckdb")
}

#[tokio::test]
async fn test_scan_and_migrate_a_fresh_store() {
    let migrations_dir = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    write_migration(
        migrations_dir.path(),
        "001.create-widgets.sql",
        "CREATE TABLE widgets (id INTEGER, name VARCHAR);",
    );
    write_migration(
        migrations_dir.path(),
        "002.seed-widgets.sql",
        "INSERT INTO widgets VALUES (1, 'anvil'), (2, 'hammer');",
    );

    let migrations = scan(migrations_dir.path(), ScanOptions::default()).unwrap();
    let driver = DuckDbDriver::new(scratch_database(&db_dir).to_str().unwrap());
    let report = migrate(&migrations, &driver, &MigrateOptions::default())
        .await
        .unwrap();

    assert_eq!(report.executed.len(), 2);
    assert_eq!(report.executed[0].level, 1);
    assert_eq!(report.executed[0].comment, "create widgets");
    assert_eq!(report.executed[1].level, 2);

    driver.connect().await.unwrap();
    let applied = driver.get_migrations().await.unwrap();
    assert_eq!(applied.len(), 2);
    assert!(applied.iter().all(|a| a.namespace == "default"));
    driver.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_a_second_run_executes_nothing() {
    let migrations_dir = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    write_migration(
        migrations_dir.path(),
        "001.create-widgets.sql",
        "CREATE TABLE widgets (id INTEGER);",
    );

    let migrations = scan(migrations_dir.path(), ScanOptions::default()).unwrap();
    let driver = DuckDbDriver::new(scratch_database(&db_dir).to_str().unwrap());

    let first = migrate(&migrations, &driver, &MigrateOptions::default())
        .await
        .unwrap();
    assert_eq!(first.executed.len(), 1);

    let second = migrate(&migrations, &driver, &MigrateOptions::default())
        .await
        .unwrap();
    assert!(second.executed.is_empty());
}

#[tokio::test]
async fn test_only_new_migrations_run_on_a_later_pass() {
    let migrations_dir = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    write_migration(
        migrations_dir.path(),
        "001.create-widgets.sql",
        "CREATE TABLE widgets (id INTEGER);",
    );

    let driver = DuckDbDriver::new(scratch_database(&db_dir).to_str().unwrap());
    let migrations = scan(migrations_dir.path(), ScanOptions::default()).unwrap();
    migrate(&migrations, &driver, &MigrateOptions::default())
        .await
        .unwrap();

    write_migration(
        migrations_dir.path(),
        "002.widen-widgets.sql",
        "ALTER TABLE widgets ADD COLUMN name VARCHAR;",
    );
    let migrations = scan(migrations_dir.path(), ScanOptions::default()).unwrap();
    let report = migrate(&migrations, &driver, &MigrateOptions::default())
        .await
        .unwrap();

    assert_eq!(report.executed.len(), 1);
    assert_eq!(report.executed[0].level, 2);
}

#[tokio::test]
async fn test_marvrc_namespace_partitions_history() {
    let migrations_dir = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    write_migration(
        migrations_dir.path(),
        ".marvrc",
        r#"{"namespace": "inventory"}"#,
    );
    write_migration(
        migrations_dir.path(),
        "001.create-widgets.sql",
        "CREATE TABLE widgets (id INTEGER);",
    );

    let migrations = scan(migrations_dir.path(), ScanOptions::default()).unwrap();
    let driver = DuckDbDriver::new(scratch_database(&db_dir).to_str().unwrap());
    let report = migrate(&migrations, &driver, &MigrateOptions::default())
        .await
        .unwrap();

    assert_eq!(report.executed.len(), 1);
    assert_eq!(report.executed[0].namespace, "inventory");

    driver.connect().await.unwrap();
    let applied = driver.get_migrations().await.unwrap();
    assert_eq!(applied[0].namespace, "inventory");
    driver.disconnect().await.unwrap();
}

#[tokio::test]
async fn test_failing_script_leaves_earlier_migrations_applied() {
    let migrations_dir = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    write_migration(
        migrations_dir.path(),
        "001.create-widgets.sql",
        "CREATE TABLE widgets (id INTEGER);",
    );
    write_migration(migrations_dir.path(), "002.broken.sql", "THIS IS NOT SQL;");

    let migrations = scan(migrations_dir.path(), ScanOptions::default()).unwrap();
    let driver = DuckDbDriver::new(scratch_database(&db_dir).to_str().unwrap());
    let err = migrate(&migrations, &driver, &MigrateOptions::default()).await;
    assert!(err.is_err());

    driver.connect().await.unwrap();
    let applied = driver.get_migrations().await.unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].level, 1);
    driver.disconnect().await.unwrap();
}
