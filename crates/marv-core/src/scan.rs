//! Directory scanning into proposed migration records.

use crate::config::{RcFile, ScanOptions, RC_FILENAME};
use crate::directive::parse_directives;
use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

static FILE_PATTERN: OnceLock<Regex> = OnceLock::new();
static SEPARATOR_RUNS: OnceLock<Regex> = OnceLock::new();

/// Matches migration candidates: one or more leading digits, a non-digit
/// separator, a non-greedy comment, then a literal dot
fn file_pattern() -> &'static Regex {
    FILE_PATTERN.get_or_init(|| Regex::new(r"^(\d+)[^\d](.*?)\.").expect("valid regex literal"))
}

fn separator_runs() -> &'static Regex {
    SEPARATOR_RUNS.get_or_init(|| Regex::new(r"[-_]+").expect("valid regex literal"))
}

/// Scan `directory` for migration scripts.
///
/// Sub-directories are ignored. A `.marvrc` entry is consumed as runtime
/// configuration and excluded from the candidates. Files that do not look
/// like migrations, or that fail the configured filter, are silently
/// skipped. The returned records keep listing order; sorting by level is
/// the migrate operation's responsibility.
pub fn scan(directory: &Path, options: ScanOptions) -> CoreResult<Vec<Migration>> {
    let mut config = options;

    log::debug!("Reading directory {}", directory.display());
    let mut files = list_files(directory)?;

    if let Some(index) = files.iter().position(|name| name == RC_FILENAME) {
        log::debug!("Loading runtime configuration from {}", RC_FILENAME);
        files.remove(index);
        RcFile::load(&directory.join(RC_FILENAME))?.merge_into(&mut config);
    }

    let filter = compile_filter(config.filter.as_deref())?;

    let mut migrations = Vec::new();
    for name in &files {
        let path = directory.join(name);
        log::debug!("Reading file {}", name);
        let script = std::fs::read_to_string(&path).map_err(|e| CoreError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        if let Some(migration) = build_migration(name, script, &config, filter.as_ref()) {
            migrations.push(migration);
        }
    }

    validate_levels(&migrations)?;
    Ok(migrations)
}

/// List directory entries, dropping sub-directories.
///
/// Entries are returned in lexicographic filename order so that scan output
/// and duplicate-level reporting are deterministic.
fn list_files(directory: &Path) -> CoreResult<Vec<String>> {
    let entries = std::fs::read_dir(directory).map_err(|e| CoreError::DirectoryRead {
        path: directory.display().to_string(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::DirectoryRead {
            path: directory.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        let metadata = std::fs::symlink_metadata(&path).map_err(|e| CoreError::FileStat {
            path: path.display().to_string(),
            source: e,
        })?;
        if metadata.is_dir() {
            log::debug!("{} is a directory -- skipping", path.display());
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => log::warn!("Skipping {:?}: file name is not valid UTF-8", name),
        }
    }
    files.sort();
    Ok(files)
}

fn compile_filter(pattern: Option<&str>) -> CoreResult<Option<Regex>> {
    match pattern {
        None => Ok(None),
        Some(pattern) => Regex::new(pattern)
            .map(Some)
            .map_err(|e| CoreError::InvalidFilter {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }),
    }
}

/// Build a proposed record from one candidate file, or `None` when the file
/// is not a migration
fn build_migration(
    filename: &str,
    script: String,
    config: &ScanOptions,
    filter: Option<&Regex>,
) -> Option<Migration> {
    let captures = match file_pattern().captures(filename) {
        Some(captures) => captures,
        None => {
            log::debug!("{} does not match the migration pattern -- skipping", filename);
            return None;
        }
    };
    if let Some(filter) = filter {
        if !filter.is_match(filename) {
            log::debug!("{} does not match {} -- skipping", filename, filter);
            return None;
        }
    }
    let level: u64 = match captures[1].parse() {
        Ok(level) => level,
        Err(_) => {
            log::debug!("{} has an unparseable level -- skipping", filename);
            return None;
        }
    };
    let comment = separator_runs().replace_all(&captures[2], " ").into_owned();

    let mut directives = config.directives.clone();
    directives.extend(parse_directives(&script));

    Some(Migration {
        level,
        comment,
        filename: filename.to_string(),
        script,
        audit: config.directives.get("audit").cloned(),
        directives,
        namespace: config.namespace.clone(),
    })
}

/// Collect every level shared by more than one record and fail with the
/// offending filenames in listing order, comma-joined.
///
/// Validation is deferred until every file has been processed so the error
/// can enumerate all offenders at once.
fn validate_levels(migrations: &[Migration]) -> CoreResult<()> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for migration in migrations {
        *counts.entry(migration.level).or_default() += 1;
    }
    let duplicates: Vec<&str> = migrations
        .iter()
        .filter(|m| counts[&m.level] > 1)
        .map(|m| m.filename.as_str())
        .collect();
    if duplicates.is_empty() {
        return Ok(());
    }
    Err(CoreError::DuplicateLevels {
        filenames: duplicates.join(", "),
    })
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
