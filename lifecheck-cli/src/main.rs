//! lifecheck -- end-to-end lifecycle checks for a packaged app.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use lifecheck_core::config::GeneralConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);
    let (config_path, explicit) = cli.config_path();
    let log_level = cli.log_level;

    match cli.command {
        // run은 설정 파일의 로그 설정을 읽은 뒤 직접 초기화
        Commands::Run(args) => {
            commands::run::execute(args, &config_path, explicit, log_level.as_deref(), &writer)
                .await
        }
        Commands::Steps => {
            init_default_tracing(log_level)?;
            commands::steps::execute(&config_path, explicit, &writer).await
        }
        Commands::Config(args) => {
            init_default_tracing(log_level)?;
            commands::config::execute(args, &config_path, explicit, &writer).await
        }
    }
}

fn init_default_tracing(log_level: Option<String>) -> Result<(), CliError> {
    let mut general = GeneralConfig::default();
    if let Some(level) = log_level {
        general.log_level = level;
    }
    logging::init_tracing(&general)
}
