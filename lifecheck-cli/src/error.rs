//! CLI-specific error types and exit code mapping

use lifecheck_core::error::{ConfigError, LifecheckError};

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure, including missing credentials.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// At least one suite failed.
    #[error("{failed} of {total} suite(s) failed")]
    ScenarioFailed { failed: usize, total: usize },

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from lifecheck crates.
    #[error("{0}")]
    Core(#[from] LifecheckError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                  |
    /// |------|------------------------------------------|
    /// | 0    | Success                                  |
    /// | 1    | Scenario or command failure              |
    /// | 2    | Configuration error / missing credentials |
    /// | 10   | IO error                                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(LifecheckError::Config(_)) => 2,
            Self::Io(_) | Self::Core(LifecheckError::Io(_)) => 10,
            Self::Command(_) | Self::ScenarioFailed { .. } | Self::JsonSerialize(_) | Self::Core(_) => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<lifecheck_browser::BrowserError> for CliError {
    fn from(e: lifecheck_browser::BrowserError) -> Self {
        Self::Core(e.into())
    }
}
