//! Suite sequencing.
//!
//! Steps run strictly in order. The first failure stops the suite and the
//! remaining steps are reported as not run. Suites are independent: the update
//! suite runs even when the lifecycle suite failed, and only the package id
//! learned by an earlier suite is carried forward.
//!
//! The browser session is closed once at the end of [`Runner::run`], whatever
//! the outcome.

use lifecheck_browser::Browser;
use lifecheck_packager::Packager;
use lifecheck_transfer::FileTransfer;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::context::ScenarioContext;
use crate::driver::Driver;
use crate::report::{RunReport, StepReport, SuiteReport};
use crate::step::{Suite, SuiteSelection};

pub struct Runner<P, B, T> {
    driver: Driver<P, B, T>,
    manifest_id: Option<String>,
}

impl<P, B, T> Runner<P, B, T>
where
    P: Packager,
    B: Browser,
    T: FileTransfer,
{
    pub fn new(driver: Driver<P, B, T>) -> Self {
        Self {
            driver,
            manifest_id: None,
        }
    }

    pub fn driver(&self) -> &Driver<P, B, T> {
        &self.driver
    }

    /// Runs the selected suites, then closes the browser session.
    pub async fn run(&mut self, selection: SuiteSelection) -> RunReport {
        let mut suites = Vec::new();
        for suite in selection.suites() {
            suites.push(self.run_suite(suite).await);
        }
        self.shutdown().await;

        let report = RunReport::new(suites);
        info!(passed = report.passed, "run finished");
        report
    }

    /// Runs one suite to completion or to its first failure.
    pub async fn run_suite(&mut self, suite: Suite) -> SuiteReport {
        let settings = self.driver.settings();
        let steps = suite.steps(settings.build);
        let mut ctx = ScenarioContext::new(settings.location.clone());
        ctx.manifest_id = self.manifest_id.clone();

        info!(suite = %suite, steps = steps.len(), "suite started");

        let mut reports = Vec::with_capacity(steps.len());
        let mut remaining = steps.into_iter();
        for step in remaining.by_ref() {
            let started = Instant::now();
            let result = self.driver.execute(step, &mut ctx).await;
            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match result {
                Ok(()) => {
                    info!(suite = %suite, step = %step, duration_ms, "step passed");
                    reports.push(StepReport::passed(step, duration_ms));
                }
                Err(e) => {
                    error!(suite = %suite, step = %step, kind = %e.kind(), error = %e, "step failed");
                    reports.push(StepReport::failed(step, duration_ms, e.kind(), e.to_string()));
                    break;
                }
            }
        }
        reports.extend(remaining.map(StepReport::not_run));

        if ctx.manifest_id.is_some() {
            self.manifest_id = ctx.manifest_id;
        }

        let report = SuiteReport::new(suite, reports);
        info!(suite = %suite, passed = report.passed, duration_ms = report.duration_ms, "suite finished");
        report
    }

    /// Closes the browser session. Failures are logged, not returned.
    pub async fn shutdown(&self) {
        if let Err(e) = self.driver.browser().quit().await {
            warn!(error = %e, "failed to close browser session");
        }
    }
}
