//! Migration record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Namespace assigned to migrations that do not declare one
pub const DEFAULT_NAMESPACE: &str = "default";

/// A migration discovered on disk, proposed for execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Migration {
    /// Execution order and identity within a namespace
    pub level: u64,

    /// Human-readable label derived from the filename
    pub comment: String,

    /// Original file name, used only for diagnostics
    pub filename: String,

    /// Raw script content
    pub script: String,

    /// Annotations merged from configuration defaults and in-script
    /// directives, the script winning
    #[serde(default)]
    pub directives: HashMap<String, String>,

    /// Namespace partition; `None` resolves to "default" at migration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Deprecated mirror of the configured `audit` directive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<String>,
}

impl Migration {
    /// The record's namespace, or "default" when unset
    pub fn namespace_or_default(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }
}

/// A migration recorded as applied in the driver's history store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedMigration {
    pub level: u64,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// When the migration was applied
    pub timestamp: DateTime<Utc>,

    /// MD5 of the script content at application time
    pub checksum: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// A proposed migration selected for execution, stamped with its timestamp
/// and checksum immediately before it runs
#[derive(Debug, Clone, Serialize)]
pub struct ExecutableMigration {
    pub level: u64,
    pub comment: String,
    pub filename: String,
    pub script: String,
    pub directives: HashMap<String, String>,
    pub namespace: String,
    pub timestamp: DateTime<Utc>,
    pub checksum: String,

    /// Deprecated top-level audit flag carried from the proposed record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<String>,
}
