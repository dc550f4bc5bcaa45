//! DuckDB driver implementation
//!
//! Executes migration scripts through a single DuckDB connection and
//! persists applied-migration history in a dedicated table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duckdb::Connection;
use marv_core::{AppliedMigration, Driver, DriverError, DriverResult, ExecutableMigration};
use std::sync::Mutex;

/// Default name of the history-tracking table
pub const DEFAULT_TABLE: &str = "migrations";

/// DuckDB-backed implementation of the Marv driver capability
pub struct DuckDbDriver {
    path: String,
    table: String,
    conn: Mutex<Option<Connection>>,
}

impl DuckDbDriver {
    /// Create a driver for the database at `path` (`:memory:` for a
    /// transient database)
    pub fn new(path: &str) -> Self {
        Self::with_table(path, DEFAULT_TABLE)
    }

    /// Create a driver with a custom history table name
    pub fn with_table(path: &str, table: &str) -> Self {
        Self {
            path: path.to_string(),
            table: table.to_string(),
            conn: Mutex::new(None),
        }
    }

    /// Run `f` against the open connection, mapping failures to `operation`
    fn with_conn<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Connection) -> duckdb::Result<T>,
    ) -> DriverResult<T> {
        let guard = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        match guard.as_ref() {
            Some(conn) => f(conn).map_err(|e| DriverError::operation(operation, e)),
            None => Err(DriverError::operation(operation, "driver is not connected")),
        }
    }
}

#[async_trait]
impl Driver for DuckDbDriver {
    async fn connect(&self) -> DriverResult<()> {
        let conn = if self.path == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(&self.path)
        }
        .map_err(|e| DriverError::Connection(e.to_string()))?;

        let mut guard = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(conn);
        Ok(())
    }

    async fn disconnect(&self) -> DriverResult<()> {
        let mut guard = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
        Ok(())
    }

    async fn ensure_migrations(&self) -> DriverResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    \
                level BIGINT NOT NULL,\n    \
                comment VARCHAR,\n    \
                \"timestamp\" VARCHAR NOT NULL,\n    \
                checksum VARCHAR NOT NULL,\n    \
                namespace VARCHAR NOT NULL DEFAULT 'default',\n    \
                PRIMARY KEY (level, namespace)\n\
            );",
            self.table
        );
        self.with_conn("ensure_migrations", |conn| conn.execute_batch(&sql))
    }

    // DuckDB allows a single writer per database file; the storage layer
    // itself provides the cross-process exclusion the engine delegates here.
    async fn lock_migrations(&self) -> DriverResult<()> {
        self.with_conn("lock_migrations", |_| Ok(()))
    }

    async fn unlock_migrations(&self) -> DriverResult<()> {
        self.with_conn("unlock_migrations", |_| Ok(()))
    }

    async fn get_migrations(&self) -> DriverResult<Vec<AppliedMigration>> {
        let sql = format!(
            "SELECT level, namespace, \"timestamp\", checksum FROM {} ORDER BY namespace, level",
            self.table
        );
        let rows = self.with_conn("get_migrations", |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let mapped = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?;
            mapped.collect::<duckdb::Result<Vec<_>>>()
        })?;

        rows.into_iter().map(to_applied).collect()
    }

    async fn run_migration(&self, migration: &ExecutableMigration) -> DriverResult<()> {
        self.with_conn("run_migration", |conn| {
            conn.execute_batch(&migration.script)?;

            if is_unaudited(migration) {
                log::debug!(
                    "Migration {} is unaudited -- not recording history",
                    migration.level
                );
                return Ok(());
            }

            let sql = format!(
                "INSERT INTO {} (level, comment, \"timestamp\", checksum, namespace) \
                 VALUES (?, ?, ?, ?, ?)",
                self.table
            );
            conn.execute(
                &sql,
                duckdb::params![
                    migration.level as i64,
                    migration.comment,
                    migration.timestamp.to_rfc3339(),
                    migration.checksum,
                    migration.namespace,
                ],
            )?;
            Ok(())
        })
    }

    async fn drop_migrations(&self) -> DriverResult<()> {
        let sql = format!("DROP TABLE IF EXISTS {};", self.table);
        self.with_conn("drop_migrations", |conn| conn.execute_batch(&sql))
    }
}

/// An `audit = false` directive marks a migration as unaudited: the script
/// runs but no history row is written, so the migration is re-run on every
/// pass.
fn is_unaudited(migration: &ExecutableMigration) -> bool {
    migration
        .directives
        .get("audit")
        .is_some_and(|value| value.eq_ignore_ascii_case("false"))
}

fn to_applied(
    (level, namespace, timestamp, checksum): (i64, String, String, String),
) -> DriverResult<AppliedMigration> {
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| {
            DriverError::operation("get_migrations", format!("bad timestamp '{timestamp}': {e}"))
        })?
        .with_timezone(&Utc);
    Ok(AppliedMigration {
        level: level as u64,
        namespace,
        timestamp,
        checksum,
    })
}
