//! Resolving apps by location and parsing CLI JSON output.

use lifecheck_core::types::{AppRecord, BackupRecord, Inspection};

use crate::error::PackagerError;

/// Selects the single app installed at `location`.
///
/// Zero matches and more than one match are both failures.
pub fn select_app(inspection: &Inspection, location: &str) -> Result<AppRecord, PackagerError> {
    let mut matches = inspection.apps_at(location);
    let first = matches.next().ok_or_else(|| PackagerError::AppNotFound {
        location: location.to_owned(),
    })?;
    let rest = matches.count();
    if rest > 0 {
        return Err(PackagerError::AmbiguousApp {
            location: location.to_owned(),
            count: rest + 1,
        });
    }
    Ok(first.clone())
}

/// Fails if any app is still installed at `location`.
pub fn ensure_vacant(inspection: &Inspection, location: &str) -> Result<(), PackagerError> {
    match inspection.apps_at(location).next() {
        Some(app) => Err(PackagerError::UnexpectedApp {
            location: location.to_owned(),
            app_id: app.id.clone(),
        }),
        None => Ok(()),
    }
}

/// Picks the backup to restore from.
pub fn newest_backup(backups: &[BackupRecord]) -> Result<BackupRecord, PackagerError> {
    BackupRecord::newest(backups)
        .cloned()
        .ok_or(PackagerError::NoBackups)
}

/// Parses `inspect` output.
pub fn parse_inspection(command: &str, stdout: &[u8]) -> Result<Inspection, PackagerError> {
    serde_json::from_slice(stdout).map_err(|e| PackagerError::InvalidOutput {
        command: command.to_owned(),
        reason: e.to_string(),
    })
}

/// Parses `backup list --raw` output.
pub fn parse_backups(command: &str, stdout: &[u8]) -> Result<Vec<BackupRecord>, PackagerError> {
    serde_json::from_slice(stdout).map_err(|e| PackagerError::InvalidOutput {
        command: command.to_owned(),
        reason: e.to_string(),
    })
}
