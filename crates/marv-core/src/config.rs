//! Scan configuration and `.marvrc` runtime overrides.

use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Name of the per-directory runtime configuration file
pub const RC_FILENAME: &str = ".marvrc";

/// Options controlling a directory scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Pattern applied to candidate filenames; `None` matches everything
    pub filter: Option<String>,

    /// Directive defaults applied to every migration (in-script wins)
    pub directives: HashMap<String, String>,

    /// Namespace stamped onto every scanned migration
    pub namespace: Option<String>,
}

/// Contents of a `.marvrc` file.
///
/// The file is JSON and may override the scan's `namespace`, `directives`,
/// and `filter`. Values merge over the running options with the file
/// winning; directive keys merge individually.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RcFile {
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub directives: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub filter: Option<String>,
}

impl RcFile {
    /// Load and parse a `.marvrc` file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| CoreError::RcParse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Merge this file's overrides into `options`, the file winning
    pub fn merge_into(self, options: &mut ScanOptions) {
        if self.namespace.is_some() {
            options.namespace = self.namespace;
        }
        if self.filter.is_some() {
            options.filter = self.filter;
        }
        for (key, value) in self.directives {
            options.directives.insert(key, coerce_directive(value));
        }
    }
}

/// Render a JSON directive value in the string form directives carry
fn coerce_directive(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
