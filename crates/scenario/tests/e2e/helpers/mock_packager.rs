//! In-memory packaging system.
//!
//! Keeps a fleet of apps and a list of backups, and mutates them the way the
//! real tool would. Every call is journaled as `cloudron <args>`.

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lifecheck_core::types::{AppRecord, BackupRecord, Inspection, Manifest};
use lifecheck_packager::{Packager, PackagerCommand, PackagerError};

use super::journal::Journal;

pub const API_ENDPOINT: &str = "my.example.com";
pub const DOMAIN: &str = "example.com";
pub const LOCAL_MANIFEST_ID: &str = "io.lamp.local";

#[derive(Default)]
struct Fleet {
    apps: Vec<AppRecord>,
    backups: Vec<BackupRecord>,
    next_app: usize,
    next_backup: usize,
}

pub struct MockPackager {
    journal: Journal,
    fleet: Mutex<Fleet>,
    /// Commands (rendered args) that exit non-zero
    failing: Vec<String>,
    /// `install` creates two apps at the location
    duplicate_installs: bool,
    /// `configure` succeeds without moving the app
    ignore_configure: bool,
    /// `configure` installs a copy at the new location and keeps the original
    copy_on_configure: bool,
    /// `uninstall` succeeds without removing the app
    ignore_uninstall: bool,
}

#[allow(dead_code)]
impl MockPackager {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            fleet: Mutex::new(Fleet::default()),
            failing: Vec::new(),
            duplicate_installs: false,
            ignore_configure: false,
            copy_on_configure: false,
            ignore_uninstall: false,
        }
    }

    /// Makes `args` (e.g. `"backup create --app app-1"`) exit non-zero.
    pub fn failing(mut self, args: &str) -> Self {
        self.failing.push(args.to_owned());
        self
    }

    pub fn duplicate_installs(mut self) -> Self {
        self.duplicate_installs = true;
        self
    }

    pub fn ignore_configure(mut self) -> Self {
        self.ignore_configure = true;
        self
    }

    pub fn copy_on_configure(mut self) -> Self {
        self.copy_on_configure = true;
        self
    }

    pub fn ignore_uninstall(mut self) -> Self {
        self.ignore_uninstall = true;
        self
    }

    /// Seeds a backup list as the tool would report it.
    pub fn with_backups(self, backups: Vec<BackupRecord>) -> Self {
        self.fleet.lock().expect("fleet lock").backups = backups;
        self
    }

    pub fn apps(&self) -> Vec<AppRecord> {
        self.fleet.lock().expect("fleet lock").apps.clone()
    }

    fn call(&self, cmd: PackagerCommand) -> Result<(), PackagerError> {
        let args = cmd.to_string();
        self.journal.record(format!("cloudron {args}"));
        if self.failing.contains(&args) {
            return Err(PackagerError::CommandFailed {
                command: format!("cloudron {args}"),
                status: "exit status: 1".to_owned(),
            });
        }
        Ok(())
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn fqdn(location: &str) -> String {
    format!("{location}.{DOMAIN}")
}

impl Packager for MockPackager {
    async fn build(&self) -> Result<(), PackagerError> {
        self.call(PackagerCommand::Build)
    }

    async fn install(&self, location: &str, appstore_id: Option<&str>) -> Result<(), PackagerError> {
        self.call(PackagerCommand::Install {
            location: location.to_owned(),
            appstore_id: appstore_id.map(str::to_owned),
        })?;
        let mut fleet = self.fleet.lock().expect("fleet lock");
        let copies = if self.duplicate_installs { 2 } else { 1 };
        for _ in 0..copies {
            fleet.next_app += 1;
            let id = format!("app-{}", fleet.next_app);
            fleet.apps.push(AppRecord {
                id,
                location: location.to_owned(),
                fqdn: fqdn(location),
                manifest: Manifest {
                    id: appstore_id.unwrap_or(LOCAL_MANIFEST_ID).to_owned(),
                },
            });
        }
        Ok(())
    }

    async fn configure_location(&self, app_id: &str, location: &str) -> Result<(), PackagerError> {
        self.call(PackagerCommand::Configure {
            app_id: app_id.to_owned(),
            location: location.to_owned(),
        })?;
        if self.ignore_configure {
            return Ok(());
        }
        let mut fleet = self.fleet.lock().expect("fleet lock");
        if self.copy_on_configure {
            let Some(original) = fleet.apps.iter().find(|a| a.id == app_id).cloned() else {
                return Ok(());
            };
            fleet.next_app += 1;
            let id = format!("app-{}", fleet.next_app);
            fleet.apps.push(AppRecord {
                id,
                location: location.to_owned(),
                fqdn: fqdn(location),
                manifest: original.manifest,
            });
            return Ok(());
        }
        if let Some(app) = fleet.apps.iter_mut().find(|a| a.id == app_id) {
            app.location = location.to_owned();
            app.fqdn = fqdn(location);
        }
        Ok(())
    }

    async fn update(&self, app: &str) -> Result<(), PackagerError> {
        self.call(PackagerCommand::Update {
            app: app.to_owned(),
        })
    }

    async fn uninstall(&self, app_id: &str) -> Result<(), PackagerError> {
        self.call(PackagerCommand::Uninstall {
            app_id: app_id.to_owned(),
        })?;
        if !self.ignore_uninstall {
            self.fleet
                .lock()
                .expect("fleet lock")
                .apps
                .retain(|a| a.id != app_id);
        }
        Ok(())
    }

    async fn create_backup(&self, app_id: &str) -> Result<(), PackagerError> {
        self.call(PackagerCommand::BackupCreate {
            app_id: app_id.to_owned(),
        })?;
        let mut fleet = self.fleet.lock().expect("fleet lock");
        fleet.next_backup += 1;
        let n = fleet.next_backup;
        // 실제 도구처럼 최신 백업을 앞에 둠
        fleet.backups.insert(
            0,
            BackupRecord {
                id: format!("backup-{n}"),
                creation_time: Some(base_time() + Duration::hours(n as i64)),
            },
        );
        Ok(())
    }

    async fn list_backups(&self) -> Result<Vec<BackupRecord>, PackagerError> {
        self.call(PackagerCommand::BackupList)?;
        Ok(self.fleet.lock().expect("fleet lock").backups.clone())
    }

    async fn restore(&self, backup_id: &str, app_id: &str) -> Result<(), PackagerError> {
        self.call(PackagerCommand::Restore {
            backup_id: backup_id.to_owned(),
            app_id: app_id.to_owned(),
        })
    }

    async fn inspect(&self) -> Result<Inspection, PackagerError> {
        self.call(PackagerCommand::Inspect)?;
        Ok(Inspection {
            api_endpoint: API_ENDPOINT.to_owned(),
            apps: self.fleet.lock().expect("fleet lock").apps.clone(),
        })
    }
}
