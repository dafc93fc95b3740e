//! Packaging CLI invocations as data.
//!
//! Every call the driver makes is a [`PackagerCommand`]; turning it into argv is
//! pure so the exact command line can be logged, shown in errors, and tested.

use std::fmt;

/// One packaging CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagerCommand {
    /// `build`
    Build,
    /// `install [--appstore-id <id>] --location <location>`
    Install {
        location: String,
        appstore_id: Option<String>,
    },
    /// `configure --location <location> --app <app_id>`
    Configure { app_id: String, location: String },
    /// `update --app <app>`
    Update { app: String },
    /// `uninstall --app <app_id>`
    Uninstall { app_id: String },
    /// `backup create --app <app_id>`
    BackupCreate { app_id: String },
    /// `backup list --raw`
    BackupList,
    /// `restore --backup <backup_id> --app <app_id>`
    Restore { backup_id: String, app_id: String },
    /// `inspect`
    Inspect,
}

impl PackagerCommand {
    /// Arguments passed after the binary name.
    pub fn args(&self) -> Vec<String> {
        fn owned(parts: &[&str]) -> Vec<String> {
            parts.iter().map(|s| (*s).to_owned()).collect()
        }

        match self {
            Self::Build => owned(&["build"]),
            Self::Install {
                location,
                appstore_id,
            } => {
                let mut args = owned(&["install"]);
                if let Some(id) = appstore_id {
                    args.push("--appstore-id".to_owned());
                    args.push(id.clone());
                }
                args.push("--location".to_owned());
                args.push(location.clone());
                args
            }
            Self::Configure { app_id, location } => {
                owned(&["configure", "--location", location.as_str(), "--app", app_id.as_str()])
            }
            Self::Update { app } => owned(&["update", "--app", app.as_str()]),
            Self::Uninstall { app_id } => owned(&["uninstall", "--app", app_id.as_str()]),
            Self::BackupCreate { app_id } => owned(&["backup", "create", "--app", app_id.as_str()]),
            Self::BackupList => owned(&["backup", "list", "--raw"]),
            Self::Restore { backup_id, app_id } => {
                owned(&["restore", "--backup", backup_id.as_str(), "--app", app_id.as_str()])
            }
            Self::Inspect => owned(&["inspect"]),
        }
    }

    /// Whether the command prints JSON that the driver must capture.
    pub fn captures_output(&self) -> bool {
        matches!(self, Self::BackupList | Self::Inspect)
    }

    /// Full command line for logs and error messages.
    pub fn render(&self, binary: &str) -> String {
        let mut line = binary.to_owned();
        for arg in self.args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

impl fmt::Display for PackagerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}
