//! Lifecycle scenarios for lifecheck.
//!
//! A run executes one or two fixed suites against a packaged app:
//!
//! - **lifecycle**: install, verify, upload, backup, restore, move, uninstall
//! - **update**: install from the store, upload, update, verify, uninstall
//!
//! # Module Structure
//!
//! - [`step`]: `Step`, `Suite` and their fixed orderings
//! - [`context`]: `ScenarioContext`, the state threaded through a suite
//! - [`driver`]: `Driver`, executing one step against the collaborators
//! - [`runner`]: `Runner`, fail-fast sequencing and teardown
//! - [`report`]: `RunReport` / `SuiteReport` / `StepReport`
//! - [`error`]: `ScenarioError` and its failure kinds

pub mod context;
pub mod driver;
pub mod error;
pub mod report;
pub mod runner;
pub mod step;

pub use context::ScenarioContext;
pub use driver::{Driver, ScenarioSettings};
pub use error::{FailureKind, ScenarioError};
pub use report::{RunReport, StepReport, StepStatus, SuiteReport};
pub use runner::Runner;
pub use step::{Step, Suite, SuiteSelection, lifecycle_steps, update_steps};
