//! Packaging CLI driver for lifecheck.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`PackagerError`)
//! - [`command`]: CLI invocations as data (`PackagerCommand`)
//! - [`packager`]: `Packager` trait and the `CloudronCli` subprocess implementation
//! - [`select`]: Location-based app selection and JSON output parsing

pub mod command;
pub mod error;
pub mod packager;
pub mod select;

pub use command::PackagerCommand;
pub use error::PackagerError;
pub use packager::{CloudronCli, Packager};
pub use select::{ensure_vacant, newest_backup, select_app};
