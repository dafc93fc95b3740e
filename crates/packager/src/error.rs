//! Packager error types
//!
//! [`PackagerError`] covers subprocess failures of the packaging CLI, malformed
//! JSON output, and cardinality mismatches when resolving an app by location.
//! `From<PackagerError> for LifecheckError` lets upper layers propagate with `?`.

use lifecheck_core::error::LifecheckError;

/// Packaging CLI domain error.
#[derive(Debug, thiserror::Error)]
pub enum PackagerError {
    /// The CLI binary could not be started.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// Rendered command line
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The CLI exited with a non-zero status.
    #[error("`{command}` failed with {status}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit status description
        status: String,
    },

    /// The CLI printed something that is not the expected JSON.
    #[error("invalid output from `{command}`: {reason}")]
    InvalidOutput {
        /// Rendered command line
        command: String,
        /// Parse failure reason
        reason: String,
    },

    /// No app is installed at the expected location.
    #[error("no app found at location '{location}'")]
    AppNotFound {
        /// Expected location
        location: String,
    },

    /// More than one app matched the expected location.
    #[error("expected exactly one app at location '{location}', found {count}")]
    AmbiguousApp {
        /// Expected location
        location: String,
        /// Number of matches
        count: usize,
    },

    /// An app is still installed where none should be.
    #[error("app '{app_id}' is still installed at location '{location}'")]
    UnexpectedApp {
        /// Location that should be empty
        location: String,
        /// Offending app
        app_id: String,
    },

    /// `backup list` returned nothing to restore from.
    #[error("no backups available")]
    NoBackups,
}

impl PackagerError {
    /// Whether this error is an expectation mismatch rather than a tool failure.
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Self::AppNotFound { .. }
                | Self::AmbiguousApp { .. }
                | Self::UnexpectedApp { .. }
                | Self::NoBackups
        )
    }
}

impl From<PackagerError> for LifecheckError {
    fn from(err: PackagerError) -> Self {
        if err.is_assertion() {
            LifecheckError::Assertion(err.to_string())
        } else {
            LifecheckError::Packager(err.to_string())
        }
    }
}
