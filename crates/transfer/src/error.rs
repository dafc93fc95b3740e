//! Transfer error types

use std::path::PathBuf;

use lifecheck_core::error::LifecheckError;

/// File transfer domain error.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The known_hosts file exists but could not be read or rewritten.
    #[error("failed to update known_hosts {}: {source}", path.display())]
    KnownHosts {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The transfer client could not be started or fed its batch.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Rendered command line, password masked
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The transfer client exited with a non-zero status.
    #[error("upload failed with {status}; re-run manually: {hint}")]
    CommandFailed {
        /// Exit status description
        status: String,
        /// Shell command reproducing the upload
        hint: String,
    },
}

impl From<TransferError> for LifecheckError {
    fn from(err: TransferError) -> Self {
        LifecheckError::Transfer(err.to_string())
    }
}
