//! Error types for marv-core

use crate::driver::DriverError;
use thiserror::Error;

/// Engine error type for Marv
#[derive(Error, Debug)]
pub enum CoreError {
    /// The migrations directory could not be listed
    #[error("failed to read migrations directory '{path}': {source}")]
    DirectoryRead {
        path: String,
        source: std::io::Error,
    },

    /// A directory entry could not be inspected
    #[error("failed to stat '{path}': {source}")]
    FileStat {
        path: String,
        source: std::io::Error,
    },

    /// A migration file could not be read
    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// A `.marvrc` file was present but was not valid JSON
    #[error("failed to parse '{path}': {source}")]
    RcParse {
        path: String,
        source: serde_json::Error,
    },

    /// The configured filename filter is not a valid pattern
    #[error("invalid filter pattern '{pattern}': {message}")]
    InvalidFilter { pattern: String, message: String },

    /// Two or more migration files share a level
    #[error("Found migrations with duplicate levels: {filenames}")]
    DuplicateLevels { filenames: String },

    /// A migration below the namespace watermark was never applied
    #[error("Migration {level} from namespace: {namespace} was skipped")]
    SkippedMigration { level: u64, namespace: String },

    /// A driver operation failed
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
