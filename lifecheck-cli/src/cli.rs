//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use lifecheck_scenario::SuiteSelection;

/// Default configuration file, looked up in the current directory.
pub const DEFAULT_CONFIG_PATH: &str = "lifecheck.toml";

/// lifecheck -- end-to-end lifecycle checks for a packaged app.
///
/// Use `lifecheck <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "lifecheck", version, about, long_about = None)]
pub struct Cli {
    /// Path to the lifecheck.toml configuration file [default: lifecheck.toml].
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration path and whether it was given explicitly.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        }
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the lifecycle and/or update suites against the packaging system.
    Run(RunArgs),

    /// List the steps each suite executes.
    Steps,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Which suites to run.
    #[arg(long, default_value = "all")]
    pub suite: SuiteArg,

    /// Override the install location.
    #[arg(long)]
    pub location: Option<String>,

    /// Build the package before the lifecycle suite.
    #[arg(long)]
    pub build: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SuiteArg {
    /// Lifecycle suite, then update suite.
    All,
    /// Install, upload, backup, restore, move, uninstall.
    Lifecycle,
    /// Install from the store, upload, update, uninstall.
    Update,
}

impl From<SuiteArg> for SuiteSelection {
    fn from(arg: SuiteArg) -> Self {
        match arg {
            SuiteArg::All => SuiteSelection::All,
            SuiteArg::Lifecycle => SuiteSelection::Lifecycle,
            SuiteArg::Update => SuiteSelection::Update,
        }
    }
}

// ---- config ----

/// Manage lifecheck configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, packager, scenario, browser, transfer).
        #[arg(long)]
        section: Option<String>,
    },
}
