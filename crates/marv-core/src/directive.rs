//! In-script directive parsing.
//!
//! Migration scripts may embed `-- @MARV key = value` annotations that
//! control per-migration behavior (e.g. `audit`).

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static DIRECTIVE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn directive_pattern() -> &'static Regex {
    DIRECTIVE_PATTERN.get_or_init(|| {
        Regex::new(r"(?mi)^--\s*@MARV\s+(\w+)\s*=\s*(.+)$").expect("valid regex literal")
    })
}

/// Extract `-- @MARV key = value` annotations from a migration script.
///
/// The marker is matched case-insensitively; keys are lowercased and values
/// trimmed of surrounding whitespace. When a key appears on multiple lines
/// the last occurrence wins. A script without directives yields an empty
/// map, which is not an error.
pub fn parse_directives(script: &str) -> HashMap<String, String> {
    let mut directives = HashMap::new();
    for captures in directive_pattern().captures_iter(script) {
        directives.insert(captures[1].to_lowercase(), captures[2].trim().to_string());
    }
    directives
}

#[cfg(test)]
#[path = "directive_test.rs"]
mod tests;
