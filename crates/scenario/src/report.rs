//! Run reports.

use serde::Serialize;

use crate::error::FailureKind;
use crate::step::{Step, Suite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Passed,
    Failed,
    NotRun,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::NotRun => "not-run",
        };
        f.write_str(s)
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub name: Step,
    pub status: StepStatus,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    pub fn passed(name: Step, duration_ms: u64) -> Self {
        Self {
            name,
            status: StepStatus::Passed,
            duration_ms,
            kind: None,
            error: None,
        }
    }

    pub fn failed(name: Step, duration_ms: u64, kind: FailureKind, error: String) -> Self {
        Self {
            name,
            status: StepStatus::Failed,
            duration_ms,
            kind: Some(kind),
            error: Some(error),
        }
    }

    pub fn not_run(name: Step) -> Self {
        Self {
            name,
            status: StepStatus::NotRun,
            duration_ms: 0,
            kind: None,
            error: None,
        }
    }
}

/// Outcome of one suite.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: Suite,
    pub passed: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepReport>,
}

impl SuiteReport {
    pub fn new(suite: Suite, steps: Vec<StepReport>) -> Self {
        let passed = steps.iter().all(|s| s.status == StepStatus::Passed);
        let duration_ms = steps.iter().map(|s| s.duration_ms).sum();
        Self {
            suite,
            passed,
            duration_ms,
            steps,
        }
    }

    /// The step that stopped this suite, if any.
    pub fn failure(&self) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.status == StepStatus::Failed)
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub passed: bool,
    pub suites: Vec<SuiteReport>,
}

impl RunReport {
    pub fn new(suites: Vec<SuiteReport>) -> Self {
        Self {
            passed: suites.iter().all(|s| s.passed),
            suites,
        }
    }
}
