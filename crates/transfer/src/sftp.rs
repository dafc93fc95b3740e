//! Artifact upload.
//!
//! [`SftpUploader`] drives the system `sftp` client through `sshpass`, feeding
//! it a fixed batch (`cd`, `put`, `bye`) on stdin. The password is handed over
//! through the `SSHPASS` environment variable and never appears in argv or logs.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use lifecheck_core::config::{Credentials, TransferConfig};

use crate::error::TransferError;
use crate::known_hosts::scrub_configured;

/// Environment variable `sshpass -e` reads the password from.
const SSHPASS_ENV: &str = "SSHPASS";

/// Where an upload goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTarget {
    /// App domain, used as the sftp user's realm and for known_hosts cleanup
    pub fqdn: String,
    /// Host serving the file-transfer endpoint
    pub api_endpoint: String,
}

impl TransferTarget {
    pub fn new(fqdn: impl Into<String>, api_endpoint: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            api_endpoint: api_endpoint.into(),
        }
    }
}

/// Uploads the test artifact into an app's data directory.
pub trait FileTransfer: Send + Sync {
    fn upload(
        &self,
        target: &TransferTarget,
    ) -> impl Future<Output = Result<(), TransferError>> + Send;
}

/// File name the artifact is stored under remotely.
pub fn artifact_file_name(artifact: &str) -> String {
    Path::new(artifact)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| artifact.to_owned())
}

/// [`FileTransfer`] over `sshpass` + `sftp`.
#[derive(Debug, Clone)]
pub struct SftpUploader {
    sshpass_binary: String,
    sftp_binary: String,
    port: u16,
    remote_dir: String,
    artifact: PathBuf,
    known_hosts: Option<String>,
    credentials: Credentials,
}

impl SftpUploader {
    pub fn from_config(config: &TransferConfig, credentials: Credentials) -> Self {
        Self {
            sshpass_binary: config.sshpass_binary.clone(),
            sftp_binary: config.sftp_binary.clone(),
            port: config.port,
            remote_dir: config.remote_dir.clone(),
            artifact: PathBuf::from(&config.artifact),
            known_hosts: config.known_hosts.clone(),
            credentials,
        }
    }

    /// `user@fqdn@apiEndpoint`
    pub fn destination(&self, target: &TransferTarget) -> String {
        format!(
            "{}@{}@{}",
            self.credentials.username, target.fqdn, target.api_endpoint
        )
    }

    /// Arguments passed to `sshpass -e`, starting with the sftp binary.
    pub fn sftp_args(&self, target: &TransferTarget) -> Vec<String> {
        vec![
            self.sftp_binary.clone(),
            "-P".to_owned(),
            self.port.to_string(),
            "-o".to_owned(),
            "StrictHostKeyChecking=no".to_owned(),
            "-oBatchMode=no".to_owned(),
            "-b".to_owned(),
            "-".to_owned(),
            self.destination(target),
        ]
    }

    /// Batch script fed to sftp on stdin.
    pub fn batch(&self) -> String {
        format!(
            "cd {}\nput {}\nbye\n",
            self.remote_dir,
            artifact_file_name(&self.artifact.to_string_lossy())
        )
    }

    /// Shell command that reproduces the upload by hand, password taken from `$PASSWORD`.
    pub fn rerun_hint(&self, target: &TransferTarget) -> String {
        let batch = self.batch().replace('\n', "\\n");
        format!(
            "cd {} && printf '{}' | {} -p\"$PASSWORD\" {}",
            self.working_dir().display(),
            batch,
            self.sshpass_binary,
            self.sftp_args(target).join(" ")
        )
    }

    fn working_dir(&self) -> &Path {
        match self.artifact.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl FileTransfer for SftpUploader {
    async fn upload(&self, target: &TransferTarget) -> Result<(), TransferError> {
        scrub_configured(self.known_hosts.as_deref(), &target.fqdn)?;

        let hint = self.rerun_hint(target);
        info!(
            destination = %self.destination(target),
            artifact = %self.artifact.display(),
            "uploading artifact (if this fails, set `StrictHostKeyChecking no` and `HashKnownHosts no` for the host in ~/.ssh/config)"
        );
        info!(command = %hint, "manual re-run");

        let mut child = Command::new(&self.sshpass_binary)
            .arg("-e")
            .args(self.sftp_args(target))
            .env(SSHPASS_ENV, &self.credentials.password)
            .current_dir(self.working_dir())
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TransferError::Spawn {
                command: hint.clone(),
                source,
            })?;

        // stdin을 닫아야 sftp가 배치 끝을 인식함
        let fed = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(self.batch().as_bytes()).await,
            None => Ok(()),
        };

        let status = child.wait().await.map_err(|source| TransferError::Spawn {
            command: hint.clone(),
            source,
        })?;
        if !status.success() {
            return Err(TransferError::CommandFailed {
                status: status.to_string(),
                hint,
            });
        }
        fed.map_err(|source| TransferError::Spawn {
            command: hint,
            source,
        })?;

        debug!(destination = %self.destination(target), "upload finished");
        Ok(())
    }
}
