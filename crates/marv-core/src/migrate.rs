//! The migrate orchestrator.
//!
//! Owns the connect -> ensure -> lock -> fetch-history -> (per namespace:
//! delta -> run) -> unlock -> disconnect lifecycle with failure-safe
//! cleanup.

use crate::checksum::compute_checksum;
use crate::driver::Driver;
use crate::error::{CoreError, CoreResult};
use crate::migration::{AppliedMigration, ExecutableMigration, Migration};
use chrono::Utc;
use std::collections::{HashMap, HashSet};

/// Options controlling a migration run
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Suppress deprecation warnings
    pub quiet: bool,
}

/// One migration executed during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedMigration {
    pub namespace: String,
    pub level: u64,
    pub comment: String,
}

/// Outcome of a successful migration run
#[derive(Debug, Default)]
pub struct MigrateReport {
    /// Migrations executed this run, in execution order
    pub executed: Vec<ExecutedMigration>,

    /// Deprecation warnings collected during the run; empty when quiet
    pub warnings: Vec<String>,
}

/// Run every eligible migration through `driver`.
///
/// A connect failure propagates immediately with no cleanup. Once
/// connected, unlock and disconnect are always both attempted, whether or
/// not the run succeeded; the first error from the run itself takes
/// precedence over any cleanup error.
pub async fn migrate(
    migrations: &[Migration],
    driver: &dyn Driver,
    options: &MigrateOptions,
) -> CoreResult<MigrateReport> {
    log::debug!("Connecting driver");
    driver.connect().await.map_err(CoreError::from)?;

    let outcome = migrate_connected(migrations, driver, options).await;

    log::debug!("Unlocking migrations");
    let unlocked = driver.unlock_migrations().await;
    log::debug!("Disconnecting driver");
    let disconnected = driver.disconnect().await;

    let report = outcome?;
    unlocked.and(disconnected)?;
    Ok(report)
}

/// The protocol between connect and cleanup, fail-fast at every step
async fn migrate_connected(
    migrations: &[Migration],
    driver: &dyn Driver,
    options: &MigrateOptions,
) -> CoreResult<MigrateReport> {
    log::debug!("Ensuring migrations");
    driver.ensure_migrations().await?;
    log::debug!("Locking migrations");
    driver.lock_migrations().await?;
    log::debug!("Getting existing migrations");
    let applied = driver.get_migrations().await?;

    let applied_by_namespace = group_applied(applied);
    let (namespaces, proposed_by_namespace) = group_proposed(migrations);

    let mut report = MigrateReport::default();
    for namespace in &namespaces {
        let previous = applied_by_namespace
            .get(namespace.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let proposed = &proposed_by_namespace[namespace.as_str()];
        let eligible = eligible_migrations(namespace, previous, proposed)?;
        run_migrations(driver, namespace, eligible, options, &mut report).await?;
    }
    Ok(report)
}

fn group_applied(applied: Vec<AppliedMigration>) -> HashMap<String, Vec<AppliedMigration>> {
    let mut groups: HashMap<String, Vec<AppliedMigration>> = HashMap::new();
    for migration in applied {
        groups
            .entry(migration.namespace.clone())
            .or_default()
            .push(migration);
    }
    groups
}

/// Group proposed records by namespace, resolving unset namespaces to
/// "default" and preserving first-seen namespace order
fn group_proposed(migrations: &[Migration]) -> (Vec<String>, HashMap<String, Vec<&Migration>>) {
    let mut order = Vec::new();
    let mut groups: HashMap<String, Vec<&Migration>> = HashMap::new();
    for migration in migrations {
        let namespace = migration.namespace_or_default();
        if !groups.contains_key(namespace) {
            order.push(namespace.to_string());
        }
        groups
            .entry(namespace.to_string())
            .or_default()
            .push(migration);
    }
    (order, groups)
}

/// Classify one namespace's proposed records against its history.
///
/// Applied levels are excluded. Levels above the watermark are eligible.
/// Anything else was skipped: tolerated and excluded when the record
/// carries an `audit` directive, fatal otherwise. Eligible records are
/// returned sorted ascending by level, stamped with their timestamp and
/// checksum.
fn eligible_migrations(
    namespace: &str,
    previous: &[AppliedMigration],
    proposed: &[&Migration],
) -> CoreResult<Vec<ExecutableMigration>> {
    let watermark = previous.iter().map(|m| m.level).max().unwrap_or(0);
    log::debug!(
        "Selecting eligible migrations for namespace: {} from level {}",
        namespace,
        watermark
    );

    let applied_levels: HashSet<u64> = previous.iter().map(|m| m.level).collect();

    let mut eligible: Vec<&Migration> = Vec::new();
    for migration in proposed {
        if applied_levels.contains(&migration.level) {
            continue;
        }
        if migration.level > watermark {
            eligible.push(*migration);
            continue;
        }
        if migration.directives.contains_key("audit") {
            continue;
        }
        return Err(CoreError::SkippedMigration {
            level: migration.level,
            namespace: namespace.to_string(),
        });
    }
    eligible.sort_by_key(|m| m.level);

    let now = Utc::now();
    Ok(eligible
        .into_iter()
        .map(|migration| ExecutableMigration {
            level: migration.level,
            comment: migration.comment.clone(),
            filename: migration.filename.clone(),
            script: migration.script.clone(),
            directives: migration.directives.clone(),
            namespace: namespace.to_string(),
            timestamp: now,
            checksum: compute_checksum(&migration.script),
            audit: migration.audit.clone(),
        })
        .collect())
}

/// Execute eligible records strictly sequentially, aborting on the first
/// failure
async fn run_migrations(
    driver: &dyn Driver,
    namespace: &str,
    eligible: Vec<ExecutableMigration>,
    options: &MigrateOptions,
    report: &mut MigrateReport,
) -> CoreResult<()> {
    log::debug!(
        "Running {} migrations for namespace: {}",
        eligible.len(),
        namespace
    );
    for mut migration in eligible {
        normalize_legacy_audit(&mut migration, options, report);
        driver.run_migration(&migration).await?;
        report.executed.push(ExecutedMigration {
            namespace: migration.namespace,
            level: migration.level,
            comment: migration.comment,
        });
    }
    Ok(())
}

/// Mirror the deprecated top-level `audit` field into the directives map
/// when no `audit` directive is present
fn normalize_legacy_audit(
    migration: &mut ExecutableMigration,
    options: &MigrateOptions,
    report: &mut MigrateReport,
) {
    let Some(audit) = migration.audit.clone() else {
        return;
    };
    if migration.directives.contains_key("audit") {
        return;
    }
    migration.directives.insert("audit".to_string(), audit);
    if !options.quiet {
        let warning = format!(
            "The 'audit' field on migration {} is deprecated. Please use the 'audit' directive instead.",
            migration.level
        );
        log::warn!("{}", warning);
        report.warnings.push(warning);
    }
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
