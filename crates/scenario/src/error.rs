//! Scenario error types
//!
//! [`ScenarioError`] is what a failed step reports. Every variant maps onto one
//! of four failure kinds: configuration, external process, assertion, timeout.

use serde::Serialize;

use lifecheck_browser::BrowserError;
use lifecheck_core::error::{ConfigError, LifecheckError};
use lifecheck_packager::PackagerError;
use lifecheck_transfer::TransferError;

use crate::step::Step;

/// Why a step failed.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Packager(#[from] PackagerError),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// The step needs state an earlier step should have produced.
    #[error("{step} needs {what}, but no earlier step provided it")]
    MissingContext { step: Step, what: &'static str },

    /// Configuration cannot satisfy the step.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure category shown in run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    Config,
    Process,
    Assertion,
    Timeout,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Config => "config",
            Self::Process => "process",
            Self::Assertion => "assertion",
            Self::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

impl ScenarioError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Packager(e) if e.is_assertion() => FailureKind::Assertion,
            Self::Packager(_) | Self::Transfer(_) => FailureKind::Process,
            Self::Browser(BrowserError::Timeout { .. }) => FailureKind::Timeout,
            Self::Browser(_) => FailureKind::Process,
            Self::MissingContext { .. } => FailureKind::Assertion,
            Self::Config(_) => FailureKind::Config,
        }
    }
}

impl From<ScenarioError> for LifecheckError {
    fn from(err: ScenarioError) -> Self {
        match err {
            ScenarioError::Packager(e) => e.into(),
            ScenarioError::Browser(e) => e.into(),
            ScenarioError::Transfer(e) => e.into(),
            e @ ScenarioError::MissingContext { .. } => LifecheckError::Assertion(e.to_string()),
            ScenarioError::Config(e) => LifecheckError::Config(e),
        }
    }
}
