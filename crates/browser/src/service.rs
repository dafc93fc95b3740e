//! Local WebDriver service process.
//!
//! Starts `chromedriver` (or a selenium server) before the browser session is
//! opened and stops it after the session is closed. Readiness is detected by
//! polling `GET /status`; a process that exits during startup is reported
//! immediately instead of waiting out the startup timeout.

use std::process::Stdio;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio::process::{Child, Command};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use lifecheck_core::config::BrowserConfig;

use crate::error::BrowserError;

/// Delay between readiness probes.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// A running driver service child process.
///
/// The child is spawned with `kill_on_drop`, so dropping the service without
/// calling [`DriverService::stop`] still terminates it.
pub struct DriverService {
    child: Child,
    command: String,
}

impl DriverService {
    /// Starts the service described by `config`, or returns `None` when
    /// `driver_command` is empty and an external driver is expected instead.
    pub async fn start_from_config(config: &BrowserConfig) -> Result<Option<Self>, BrowserError> {
        if config.driver_command.trim().is_empty() {
            debug!("no driver_command configured, using external webdriver");
            return Ok(None);
        }
        Self::start(
            &config.driver_command,
            &config.driver_args,
            &config.webdriver_url,
            config.startup_timeout(),
        )
        .await
        .map(Some)
    }

    /// Spawns `command args...` and waits until `url/status` reports ready.
    pub async fn start(
        command: &str,
        args: &[String],
        url: &str,
        startup_timeout: Duration,
    ) -> Result<Self, BrowserError> {
        let rendered = std::iter::once(command)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        info!(command = %rendered, "starting webdriver service");

        let child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::Service(format!("failed to spawn `{rendered}`: {e}")))?;

        let mut service = Self {
            child,
            command: rendered,
        };
        service.wait_ready(url, startup_timeout).await?;
        info!(command = %service.command, "webdriver service ready");
        Ok(service)
    }

    async fn wait_ready(&mut self, url: &str, startup_timeout: Duration) -> Result<(), BrowserError> {
        let client = Client::new();
        let status_url = format!("{}/status", url.trim_end_matches('/'));
        let deadline = Instant::now() + startup_timeout;

        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    return Err(BrowserError::Service(format!(
                        "`{}` exited during startup with {status}",
                        self.command
                    )));
                }
                Ok(None) => {}
                Err(e) => {
                    return Err(BrowserError::Service(format!(
                        "failed to check `{}`: {e}",
                        self.command
                    )));
                }
            }

            if probe_ready(&client, &status_url).await {
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(BrowserError::Service(format!(
                    "`{}` not ready after {}ms",
                    self.command,
                    startup_timeout.as_millis()
                )));
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }

    /// Kills the service and reaps it.
    pub async fn stop(mut self) -> Result<(), BrowserError> {
        info!(command = %self.command, "stopping webdriver service");
        match self.child.kill().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(command = %self.command, error = %e, "failed to stop webdriver service");
                Err(BrowserError::Service(format!(
                    "failed to stop `{}`: {e}",
                    self.command
                )))
            }
        }
    }
}

/// Whether `GET /status` answers with `value.ready == true`.
///
/// Drivers that omit `ready` are treated as ready once they answer at all.
async fn probe_ready(client: &Client, status_url: &str) -> bool {
    let Ok(response) = client.get(status_url).send().await else {
        return false;
    };
    if !response.status().is_success() {
        return false;
    }
    match response.json::<Value>().await {
        Ok(body) => status_is_ready(&body),
        Err(_) => false,
    }
}

fn status_is_ready(body: &Value) -> bool {
    body.get("value")
        .and_then(|v| v.get("ready"))
        .and_then(Value::as_bool)
        .unwrap_or(true)
}
