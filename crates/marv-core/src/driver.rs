//! The storage-driver capability consumed by the migration engine.

use crate::migration::{AppliedMigration, ExecutableMigration};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by driver implementations
#[derive(Error, Debug)]
pub enum DriverError {
    /// Session establishment failed (D001)
    #[error("[D001] Driver connection failed: {0}")]
    Connection(String),

    /// A storage operation failed (D002)
    #[error("[D002] Driver operation '{operation}' failed: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },
}

impl DriverError {
    /// Build an operation failure from any displayable cause
    pub fn operation(operation: &'static str, message: impl ToString) -> Self {
        DriverError::Operation {
            operation,
            message: message.to_string(),
        }
    }
}

/// Result type alias for DriverError
pub type DriverResult<T> = Result<T, DriverError>;

/// Storage abstraction driven by the migration engine.
///
/// Implementations must be Send + Sync for async operation. The engine
/// calls `connect` before any other operation, brackets each run with
/// `lock_migrations`/`unlock_migrations`, and always attempts unlock and
/// disconnect once a connection was established. Cross-process exclusion
/// is entirely the driver's responsibility.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Establish a session with the target store
    async fn connect(&self) -> DriverResult<()>;

    /// Tear down the session
    async fn disconnect(&self) -> DriverResult<()>;

    /// Idempotently create or verify the history-tracking store
    async fn ensure_migrations(&self) -> DriverResult<()>;

    /// Acquire run-level mutual exclusion
    async fn lock_migrations(&self) -> DriverResult<()>;

    /// Release run-level mutual exclusion
    async fn unlock_migrations(&self) -> DriverResult<()>;

    /// Return all applied records, across all namespaces
    async fn get_migrations(&self) -> DriverResult<Vec<AppliedMigration>>;

    /// Execute one migration's script against the target
    async fn run_migration(&self, migration: &ExecutableMigration) -> DriverResult<()>;

    /// Remove the history-tracking store entirely
    async fn drop_migrations(&self) -> DriverResult<()>;
}
