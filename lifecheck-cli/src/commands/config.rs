//! `lifecheck config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use lifecheck_core::config::{LifecheckConfig, PASSWORD_ENV, USERNAME_ENV};

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

const SECTIONS: &[&str] = &["general", "packager", "scenario", "browser", "transfer"];
const REDACTED: &str = "***REDACTED***";

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    explicit: bool,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => {
            execute_show(config_path, explicit, section, writer).await
        }
    }
}

/// Loads and validates the configuration file, reporting any errors.
///
/// Unlike `run`, a missing file is reported as invalid.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match LifecheckConfig::load(config_path).await {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

/// Shows the effective configuration (file + env overrides + defaults).
///
/// Credentials never come from the file; their environment state is shown
/// with the password redacted.
async fn execute_show(
    config_path: &Path,
    explicit: bool,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = super::load_config(config_path, explicit).await?;
    let credentials = CredentialStatus::from_lookup(|name| std::env::var(name).ok());
    let report = build_config_report(&config, config_path, section, credentials)?;

    writer.render(&report)
}

fn build_config_report(
    config: &LifecheckConfig,
    config_path: &Path,
    section: Option<String>,
    credentials: CredentialStatus,
) -> Result<ConfigReport, CliError> {
    let (config_toml, config_json) = match section.as_deref() {
        None => (to_toml(config), serde_json::to_value(config)?),
        Some("general") => (to_toml(&config.general), serde_json::to_value(&config.general)?),
        Some("packager") => (to_toml(&config.packager), serde_json::to_value(&config.packager)?),
        Some("scenario") => (to_toml(&config.scenario), serde_json::to_value(&config.scenario)?),
        Some("browser") => (to_toml(&config.browser), serde_json::to_value(&config.browser)?),
        Some("transfer") => (to_toml(&config.transfer), serde_json::to_value(&config.transfer)?),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: {})",
                other,
                SECTIONS.join(", ")
            )));
        }
    };

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section,
        credentials,
        config: config_json,
        config_toml,
    })
}

fn to_toml<T: Serialize>(value: &T) -> String {
    toml::to_string_pretty(value).unwrap_or_else(|e| format!("(serialization error: {})", e))
}

/// Environment credential state, password redacted.
#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    pub username: Option<String>,
    pub password: Option<&'static str>,
}

impl CredentialStatus {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            username: set(USERNAME_ENV),
            password: set(PASSWORD_ENV).map(|_| REDACTED),
        }
    }
}

/// Configuration display report.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub credentials: CredentialStatus,
    pub config: serde_json::Value,
    /// Serialized TOML, used for text rendering only
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        let unset = "(unset)".yellow();
        match &self.credentials.username {
            Some(user) => writeln!(w, "  {}: {}", USERNAME_ENV, user)?,
            None => writeln!(w, "  {}: {}", USERNAME_ENV, unset)?,
        }
        match self.credentials.password {
            Some(redacted) => writeln!(w, "  {}: {}", PASSWORD_ENV, redacted)?,
            None => writeln!(w, "  {}: {}", PASSWORD_ENV, unset)?,
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;
        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }
        Ok(())
    }
}
