//! Local SSH trust-store maintenance.
//!
//! An app reinstalled under a previously used domain presents a new host key,
//! and `sftp` would then stop at an interactive prompt. Before each upload every
//! known_hosts line whose host field names the target host, bare or as
//! `[host]:port`, is removed. Other hosts that merely contain the name are kept.
//!
//! Hashed entries (`HashKnownHosts yes`) never mention the host in clear text
//! and are left alone.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::TransferError;

/// Resolves the known_hosts path, expanding a leading `~/`.
///
/// Without a configured path this is `~/.ssh/known_hosts`. Returns `None` when
/// the home directory is needed but unknown.
pub fn resolve_known_hosts(configured: Option<&str>) -> Option<PathBuf> {
    match configured {
        Some(path) => match path.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(path)),
        },
        None => dirs::home_dir().map(|home| home.join(".ssh").join("known_hosts")),
    }
}

/// Removes every line of `path` whose host field names `host`.
///
/// Returns the number of removed lines. A missing file counts as nothing to do.
pub fn scrub_known_hosts(path: &Path, host: &str) -> Result<usize, TransferError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "known_hosts not found, nothing to scrub");
            return Ok(0);
        }
        Err(source) => {
            return Err(TransferError::KnownHosts {
                path: path.to_owned(),
                source,
            });
        }
    };

    let (kept, removed) = without_host(&contents, host);
    if removed == 0 {
        return Ok(0);
    }

    std::fs::write(path, kept).map_err(|source| TransferError::KnownHosts {
        path: path.to_owned(),
        source,
    })?;
    info!(path = %path.display(), host, removed, "removed stale known_hosts entries");
    Ok(removed)
}

/// Scrubs the resolved known_hosts file, logging instead of failing when no
/// path can be determined.
pub fn scrub_configured(configured: Option<&str>, host: &str) -> Result<usize, TransferError> {
    match resolve_known_hosts(configured) {
        Some(path) => scrub_known_hosts(&path, host),
        None => {
            warn!(host, "home directory unknown, skipping known_hosts cleanup");
            Ok(0)
        }
    }
}

fn without_host(contents: &str, host: &str) -> (String, usize) {
    let mut kept = String::with_capacity(contents.len());
    let mut removed = 0;
    for line in contents.split_inclusive('\n') {
        if names_host(line, host) {
            removed += 1;
        } else {
            kept.push_str(line);
        }
    }
    (kept, removed)
}

/// Whether the comma-separated host field of a known_hosts line lists `host`.
///
/// A leading `@cert-authority` / `@revoked` marker is skipped.
fn names_host(line: &str, host: &str) -> bool {
    let mut fields = line.split_whitespace();
    let hosts = match fields.next() {
        Some(marker) if marker.starts_with('@') => fields.next(),
        other => other,
    };
    let Some(hosts) = hosts else {
        return false;
    };
    hosts.split(',').any(|pattern| {
        pattern == host
            || pattern
                .strip_prefix('[')
                .and_then(|rest| rest.strip_prefix(host))
                .is_some_and(|rest| rest.starts_with("]:"))
    })
}
