//! Command handlers -- one module per subcommand

pub mod config;
pub mod run;
pub mod steps;

use std::path::Path;

use lifecheck_core::config::LifecheckConfig;

use crate::error::CliError;

/// Loads configuration for commands that can run on defaults.
///
/// A missing file is only tolerated when the path was not given explicitly.
pub async fn load_config(path: &Path, explicit: bool) -> Result<LifecheckConfig, CliError> {
    let config = if explicit {
        LifecheckConfig::load(path).await?
    } else {
        LifecheckConfig::load_or_default(path).await?
    };
    Ok(config)
}
