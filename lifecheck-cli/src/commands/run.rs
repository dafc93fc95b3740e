//! `lifecheck run` command handler

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use lifecheck_browser::{DriverService, WebDriverBrowser};
use lifecheck_core::config::{Credentials, LifecheckConfig};
use lifecheck_packager::CloudronCli;
use lifecheck_scenario::{
    Driver, RunReport, Runner, ScenarioSettings, StepStatus, SuiteSelection,
};
use lifecheck_transfer::SftpUploader;

use crate::cli::RunArgs;
use crate::commands::load_config;
use crate::error::CliError;
use crate::logging;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
pub async fn execute(
    args: RunArgs,
    config_path: &Path,
    explicit: bool,
    log_level: Option<&str>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut config = load_config(config_path, explicit).await?;
    apply_overrides(&mut config, &args, log_level);
    config.validate()?;
    logging::init_tracing(&config.general)?;

    // 시나리오 구성 전에 자격 증명 확인
    let credentials = Credentials::from_env()?;

    let selection = SuiteSelection::from(args.suite);
    info!(
        suite = ?args.suite,
        location = %config.scenario.location,
        package_dir = %config.packager.package_dir,
        "starting lifecheck run"
    );

    let report = run_scenario(&config, credentials, selection).await?;
    writer.render(&report)?;

    if report.passed {
        Ok(())
    } else {
        Err(CliError::ScenarioFailed {
            failed: report.suites.iter().filter(|s| !s.passed).count(),
            total: report.suites.len(),
        })
    }
}

/// Applies CLI flags on top of file and environment settings.
fn apply_overrides(config: &mut LifecheckConfig, args: &RunArgs, log_level: Option<&str>) {
    if let Some(level) = log_level {
        config.general.log_level = level.to_owned();
    }
    if let Some(location) = &args.location {
        config.scenario.location = location.clone();
    }
    if args.build {
        config.scenario.build = true;
    }
}

/// Acquires the driver service and browser session, runs the suites and
/// releases both, in that order, whatever the outcome.
async fn run_scenario(
    config: &LifecheckConfig,
    credentials: Credentials,
    selection: SuiteSelection,
) -> Result<RunReport, CliError> {
    let service = DriverService::start_from_config(&config.browser).await?;
    let browser = match WebDriverBrowser::connect(&config.browser).await {
        Ok(browser) => browser,
        Err(e) => {
            stop_service(service).await;
            return Err(e.into());
        }
    };

    let driver = Driver::new(
        CloudronCli::from_config(&config.packager),
        browser,
        SftpUploader::from_config(&config.transfer, credentials),
        ScenarioSettings::from_config(config),
    );
    let mut runner = Runner::new(driver);
    let report = runner.run(selection).await;

    stop_service(service).await;
    Ok(report)
}

async fn stop_service(service: Option<DriverService>) {
    if let Some(service) = service {
        if let Err(e) = service.stop().await {
            warn!(error = %e, "failed to stop webdriver service");
        }
    }
}

impl Render for RunReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for suite in &self.suites {
            let verdict = if suite.passed {
                "PASSED".green().bold()
            } else {
                "FAILED".red().bold()
            };
            writeln!(
                w,
                "Suite {}: {} ({}ms)",
                suite.suite.name().bold(),
                verdict,
                suite.duration_ms
            )?;
            writeln!(w, "  {:<22} {:<8} {:>10}", "Step", "Status", "Duration")?;
            writeln!(w, "  {}", "-".repeat(42))?;

            for step in &suite.steps {
                let status = format!("{:<8}", step.status.to_string());
                let status = match step.status {
                    StepStatus::Passed => status.green(),
                    StepStatus::Failed => status.red(),
                    StepStatus::NotRun => status.dimmed(),
                };
                let duration = match step.status {
                    StepStatus::NotRun => "-".to_owned(),
                    _ => format!("{}ms", step.duration_ms),
                };
                writeln!(w, "  {:<22} {} {:>10}", step.name.name(), status, duration)?;

                if let Some(error) = &step.error {
                    let kind = step.kind.map(|k| k.to_string()).unwrap_or_default();
                    writeln!(w, "    {} {}", format!("{kind}:").red().bold(), error)?;
                }
            }
            writeln!(w)?;
        }

        let passed = self.suites.iter().filter(|s| s.passed).count();
        let summary = format!("{passed}/{} suites passed", self.suites.len());
        if self.passed {
            writeln!(w, "Result: {}", summary.green().bold())
        } else {
            writeln!(w, "Result: {}", summary.red().bold())
        }
    }
}
