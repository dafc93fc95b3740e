//! Packaging CLI abstraction.
//!
//! The [`Packager`] trait is the only way the scenario talks to the packaging
//! system, so tests can swap in a fake fleet while production uses
//! [`CloudronCli`], which shells out to the real tool.
//!
//! # Process semantics
//!
//! - Provisioning commands inherit stdio so the tool's progress is visible and
//!   are awaited until the process exits.
//! - Query commands (`inspect`, `backup list --raw`) capture stdout and parse it
//!   as JSON; stderr is still inherited.
//! - A non-zero exit is returned as [`PackagerError::CommandFailed`]. There is no
//!   retry and no timeout.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use lifecheck_core::config::PackagerConfig;
use lifecheck_core::types::{BackupRecord, Inspection};

use crate::command::PackagerCommand;
use crate::error::PackagerError;
use crate::select::{parse_backups, parse_inspection};

/// Operations the lifecycle scenario needs from the packaging system.
pub trait Packager: Send + Sync {
    /// Builds the package image from the package directory.
    fn build(&self) -> impl Future<Output = Result<(), PackagerError>> + Send;

    /// Installs the package at `location`.
    ///
    /// With `appstore_id`, installs that store package instead of the local build.
    fn install(
        &self,
        location: &str,
        appstore_id: Option<&str>,
    ) -> impl Future<Output = Result<(), PackagerError>> + Send;

    /// Moves an installed app to a new location.
    fn configure_location(
        &self,
        app_id: &str,
        location: &str,
    ) -> impl Future<Output = Result<(), PackagerError>> + Send;

    /// Updates an app to the locally built package. `app` is an id or location.
    fn update(&self, app: &str) -> impl Future<Output = Result<(), PackagerError>> + Send;

    /// Uninstalls an app.
    fn uninstall(&self, app_id: &str) -> impl Future<Output = Result<(), PackagerError>> + Send;

    /// Creates a backup of an app.
    fn create_backup(
        &self,
        app_id: &str,
    ) -> impl Future<Output = Result<(), PackagerError>> + Send;

    /// Lists backups in the order the tool reports them.
    fn list_backups(
        &self,
    ) -> impl Future<Output = Result<Vec<BackupRecord>, PackagerError>> + Send;

    /// Restores an app from a backup.
    fn restore(
        &self,
        backup_id: &str,
        app_id: &str,
    ) -> impl Future<Output = Result<(), PackagerError>> + Send;

    /// Queries the full fleet state.
    fn inspect(&self) -> impl Future<Output = Result<Inspection, PackagerError>> + Send;
}

/// [`Packager`] backed by the `cloudron` command-line tool.
#[derive(Debug, Clone)]
pub struct CloudronCli {
    binary: String,
    package_dir: PathBuf,
}

impl CloudronCli {
    /// Creates a driver for `binary`, run from `package_dir`.
    pub fn new(binary: impl Into<String>, package_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            package_dir: package_dir.into(),
        }
    }

    /// Creates a driver from the `[packager]` config section.
    pub fn from_config(config: &PackagerConfig) -> Self {
        Self::new(config.binary.clone(), config.package_dir.clone())
    }

    /// Binary this driver invokes.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command(&self, cmd: &PackagerCommand) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(cmd.args())
            .current_dir(&self.package_dir)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if cmd.captures_output() {
            command.stdout(Stdio::piped());
        } else {
            command.stdout(Stdio::inherit());
        }
        command
    }

    /// Runs a provisioning command to completion.
    async fn run(&self, cmd: PackagerCommand) -> Result<(), PackagerError> {
        let rendered = cmd.render(&self.binary);
        info!(command = %rendered, "running packaging command");

        let status = self
            .command(&cmd)
            .status()
            .await
            .map_err(|source| PackagerError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PackagerError::CommandFailed {
                command: rendered,
                status: status.to_string(),
            });
        }
        debug!(command = %rendered, "packaging command finished");
        Ok(())
    }

    /// Runs a query command and returns its stdout.
    async fn query(&self, cmd: PackagerCommand) -> Result<(String, Vec<u8>), PackagerError> {
        let rendered = cmd.render(&self.binary);
        debug!(command = %rendered, "running packaging query");

        let output = self
            .command(&cmd)
            .output()
            .await
            .map_err(|source| PackagerError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PackagerError::CommandFailed {
                command: rendered,
                status: output.status.to_string(),
            });
        }
        Ok((rendered, output.stdout))
    }
}

impl Packager for CloudronCli {
    async fn build(&self) -> Result<(), PackagerError> {
        self.run(PackagerCommand::Build).await
    }

    async fn install(&self, location: &str, appstore_id: Option<&str>) -> Result<(), PackagerError> {
        self.run(PackagerCommand::Install {
            location: location.to_owned(),
            appstore_id: appstore_id.map(str::to_owned),
        })
        .await
    }

    async fn configure_location(&self, app_id: &str, location: &str) -> Result<(), PackagerError> {
        self.run(PackagerCommand::Configure {
            app_id: app_id.to_owned(),
            location: location.to_owned(),
        })
        .await
    }

    async fn update(&self, app: &str) -> Result<(), PackagerError> {
        self.run(PackagerCommand::Update {
            app: app.to_owned(),
        })
        .await
    }

    async fn uninstall(&self, app_id: &str) -> Result<(), PackagerError> {
        self.run(PackagerCommand::Uninstall {
            app_id: app_id.to_owned(),
        })
        .await
    }

    async fn create_backup(&self, app_id: &str) -> Result<(), PackagerError> {
        self.run(PackagerCommand::BackupCreate {
            app_id: app_id.to_owned(),
        })
        .await
    }

    async fn list_backups(&self) -> Result<Vec<BackupRecord>, PackagerError> {
        let (rendered, stdout) = self.query(PackagerCommand::BackupList).await?;
        parse_backups(&rendered, &stdout)
    }

    async fn restore(&self, backup_id: &str, app_id: &str) -> Result<(), PackagerError> {
        self.run(PackagerCommand::Restore {
            backup_id: backup_id.to_owned(),
            app_id: app_id.to_owned(),
        })
        .await
    }

    async fn inspect(&self) -> Result<Inspection, PackagerError> {
        let (rendered, stdout) = self.query(PackagerCommand::Inspect).await?;
        parse_inspection(&rendered, &stdout)
    }
}
