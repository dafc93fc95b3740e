//! State threaded through the steps of one suite.

use lifecheck_core::types::AppRecord;

use crate::error::ScenarioError;
use crate::step::Step;

/// What earlier steps have learned.
///
/// A fresh context is created per suite. Only `manifest_id` is carried from the
/// lifecycle suite into the update suite.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    /// Location the app is expected at; changes after a move.
    pub expected_location: String,
    /// Most recently resolved app. Replaced whole, never patched.
    pub app: Option<AppRecord>,
    /// API host reported by the last inspection
    pub api_endpoint: Option<String>,
    /// Store package id of the last resolved app
    pub manifest_id: Option<String>,
}

impl ScenarioContext {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            expected_location: location.into(),
            ..Self::default()
        }
    }

    /// Stores a freshly resolved app and remembers its package id.
    pub fn remember(&mut self, app: AppRecord) {
        self.manifest_id = Some(app.manifest.id.clone());
        self.app = Some(app);
    }

    pub fn app(&self, step: Step) -> Result<&AppRecord, ScenarioError> {
        self.app.as_ref().ok_or(ScenarioError::MissingContext {
            step,
            what: "an inspected app",
        })
    }

    pub fn api_endpoint(&self, step: Step) -> Result<&str, ScenarioError> {
        self.api_endpoint
            .as_deref()
            .ok_or(ScenarioError::MissingContext {
                step,
                what: "the API endpoint",
            })
    }
}
