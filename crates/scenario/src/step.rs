//! Scenario steps and suites.

use std::fmt;

use serde::Serialize;

/// One step of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Build,
    Install,
    InstallFromStore,
    Inspect,
    VerifyWelcomePage,
    UploadFile,
    VerifyUploadedFile,
    VerifyFeaturePage,
    Backup,
    Restore,
    MoveLocation,
    Update,
    Uninstall,
}

impl Step {
    /// Kebab-case name used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Install => "install",
            Self::InstallFromStore => "install-from-store",
            Self::Inspect => "inspect",
            Self::VerifyWelcomePage => "verify-welcome-page",
            Self::UploadFile => "upload-file",
            Self::VerifyUploadedFile => "verify-uploaded-file",
            Self::VerifyFeaturePage => "verify-feature-page",
            Self::Backup => "backup",
            Self::Restore => "restore",
            Self::MoveLocation => "move-location",
            Self::Update => "update",
            Self::Uninstall => "uninstall",
        }
    }

    /// One-line summary for `lifecheck steps`.
    pub fn description(self) -> &'static str {
        match self {
            Self::Build => "build the package image",
            Self::Install => "install the local build at the expected location",
            Self::InstallFromStore => "install the published package at the expected location",
            Self::Inspect => "resolve exactly one app at the expected location",
            Self::VerifyWelcomePage => "the app root shows the welcome marker",
            Self::UploadFile => "upload the test artifact over sftp",
            Self::VerifyUploadedFile => "the artifact shows the upload marker and the app fqdn",
            Self::VerifyFeaturePage => "the artifact shows the feature indicator link",
            Self::Backup => "create a backup",
            Self::Restore => "reinstall and restore from the newest backup",
            Self::MoveLocation => "move the app to the second location",
            Self::Update => "update the app to the local build",
            Self::Uninstall => "uninstall and confirm the location is vacant",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An independent, ordered sequence of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Suite {
    Lifecycle,
    Update,
}

impl Suite {
    pub fn name(self) -> &'static str {
        match self {
            Self::Lifecycle => "lifecycle",
            Self::Update => "update",
        }
    }

    /// Steps in execution order. `build` prepends a build step to the lifecycle suite.
    pub fn steps(self, build: bool) -> Vec<Step> {
        match self {
            Self::Lifecycle => lifecycle_steps(build),
            Self::Update => update_steps(),
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which suites a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuiteSelection {
    #[default]
    All,
    Lifecycle,
    Update,
}

impl SuiteSelection {
    pub fn suites(self) -> Vec<Suite> {
        match self {
            Self::All => vec![Suite::Lifecycle, Suite::Update],
            Self::Lifecycle => vec![Suite::Lifecycle],
            Self::Update => vec![Suite::Update],
        }
    }
}

pub fn lifecycle_steps(build: bool) -> Vec<Step> {
    let mut steps = Vec::with_capacity(14);
    if build {
        steps.push(Step::Build);
    }
    steps.extend([
        Step::Install,
        Step::Inspect,
        Step::VerifyWelcomePage,
        Step::UploadFile,
        Step::VerifyUploadedFile,
        Step::VerifyFeaturePage,
        Step::Backup,
        Step::Restore,
        Step::VerifyUploadedFile,
        Step::MoveLocation,
        Step::VerifyUploadedFile,
        Step::VerifyFeaturePage,
        Step::Uninstall,
    ]);
    steps
}

pub fn update_steps() -> Vec<Step> {
    vec![
        Step::InstallFromStore,
        Step::Inspect,
        Step::VerifyWelcomePage,
        Step::UploadFile,
        Step::Update,
        Step::VerifyUploadedFile,
        Step::VerifyFeaturePage,
        Step::Uninstall,
    ]
}
