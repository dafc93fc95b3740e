//! `lifecheck steps` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use lifecheck_scenario::{Suite, SuiteSelection};

use crate::commands::load_config;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `steps` command.
pub async fn execute(
    config_path: &Path,
    explicit: bool,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = load_config(config_path, explicit).await?;
    writer.render(&build_steps_report(config.scenario.build))
}

fn build_steps_report(build: bool) -> StepsReport {
    let suites = SuiteSelection::All
        .suites()
        .into_iter()
        .map(|suite| SuiteSteps {
            suite,
            steps: suite
                .steps(build)
                .into_iter()
                .map(|step| StepInfo {
                    name: step.name(),
                    description: step.description(),
                })
                .collect(),
        })
        .collect();
    StepsReport { suites }
}

#[derive(Serialize)]
pub struct StepsReport {
    pub suites: Vec<SuiteSteps>,
}

#[derive(Serialize)]
pub struct SuiteSteps {
    pub suite: Suite,
    pub steps: Vec<StepInfo>,
}

#[derive(Serialize)]
pub struct StepInfo {
    pub name: &'static str,
    pub description: &'static str,
}

impl Render for StepsReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for suite in &self.suites {
            writeln!(w, "{} suite", suite.suite.name().bold())?;
            for (i, step) in suite.steps.iter().enumerate() {
                writeln!(
                    w,
                    "  {:>2}. {:<22} {}",
                    i + 1,
                    step.name,
                    step.description.dimmed()
                )?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}
