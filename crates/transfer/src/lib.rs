//! File transfer for lifecheck.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`TransferError`)
//! - [`known_hosts`]: Removal of stale host keys before connecting
//! - [`sftp`]: `FileTransfer` trait and the `sshpass` + `sftp` uploader

pub mod error;
pub mod known_hosts;
pub mod sftp;

pub use error::TransferError;
pub use known_hosts::{resolve_known_hosts, scrub_known_hosts};
pub use sftp::{FileTransfer, SftpUploader, TransferTarget, artifact_file_name};
