//! Step execution.
//!
//! [`Driver`] owns the three collaborators and runs a single [`Step`] against
//! a [`ScenarioContext`]. It never retries: the first failed command, missing
//! element, or cardinality mismatch is returned to the runner.

use lifecheck_browser::{Browser, Locator, WaitPolicy, wait_for_element};
use lifecheck_core::config::LifecheckConfig;
use lifecheck_core::error::ConfigError;
use lifecheck_core::types::Inspection;
use lifecheck_packager::{Packager, ensure_vacant, newest_backup, select_app};
use lifecheck_transfer::{FileTransfer, TransferTarget, artifact_file_name};
use tracing::{debug, info};

use crate::context::ScenarioContext;
use crate::error::ScenarioError;
use crate::step::Step;

/// Scenario parameters taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSettings {
    pub location: String,
    pub moved_location: String,
    pub build: bool,
    pub welcome_marker: String,
    pub upload_marker: String,
    pub feature_marker: String,
    /// Remote file name of the uploaded artifact, also its URL path
    pub artifact_name: String,
    /// Package id for `install-from-store` when no lifecycle run provided one
    pub appstore_id: Option<String>,
    pub wait: WaitPolicy,
}

impl ScenarioSettings {
    pub fn from_config(config: &LifecheckConfig) -> Self {
        let scenario = &config.scenario;
        Self {
            location: scenario.location.clone(),
            moved_location: scenario.moved_location(),
            build: scenario.build,
            welcome_marker: scenario.welcome_marker.clone(),
            upload_marker: scenario.upload_marker.clone(),
            feature_marker: scenario.feature_marker.clone(),
            artifact_name: artifact_file_name(&config.transfer.artifact),
            appstore_id: config.packager.appstore_id.clone(),
            wait: WaitPolicy::from_config(&config.browser),
        }
    }
}

/// Executes steps against a packager, a browser and a file transfer.
pub struct Driver<P, B, T> {
    packager: P,
    browser: B,
    transfer: T,
    settings: ScenarioSettings,
}

impl<P, B, T> Driver<P, B, T>
where
    P: Packager,
    B: Browser,
    T: FileTransfer,
{
    pub fn new(packager: P, browser: B, transfer: T, settings: ScenarioSettings) -> Self {
        Self {
            packager,
            browser,
            transfer,
            settings,
        }
    }

    pub fn settings(&self) -> &ScenarioSettings {
        &self.settings
    }

    pub fn packager(&self) -> &P {
        &self.packager
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Runs one step, updating `ctx` with whatever it learns.
    pub async fn execute(&self, step: Step, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        debug!(step = %step, location = %ctx.expected_location, "executing step");
        match step {
            Step::Build => self.packager.build().await?,
            Step::Install => self.packager.install(&ctx.expected_location, None).await?,
            Step::InstallFromStore => self.install_from_store(ctx).await?,
            Step::Inspect => self.resolve_app(ctx).await?,
            Step::VerifyWelcomePage => {
                let app = ctx.app(step)?;
                let locator = Locator::containing_text(&self.settings.welcome_marker);
                self.verify_page(&app.url(""), &[locator]).await?;
            }
            Step::UploadFile => {
                let app = ctx.app(step)?;
                let target = TransferTarget::new(app.fqdn.as_str(), ctx.api_endpoint(step)?);
                self.transfer.upload(&target).await?;
            }
            Step::VerifyUploadedFile => {
                let app = ctx.app(step)?;
                let locators = [
                    Locator::exact_text(&self.settings.upload_marker),
                    Locator::exact_text(&app.fqdn),
                ];
                self.verify_page(&app.url(&self.settings.artifact_name), &locators)
                    .await?;
            }
            Step::VerifyFeaturePage => {
                let app = ctx.app(step)?;
                let locator = Locator::link_containing_text(&self.settings.feature_marker);
                self.verify_page(&app.url(&self.settings.artifact_name), &[locator])
                    .await?;
            }
            Step::Backup => {
                let app = ctx.app(step)?;
                self.packager.create_backup(&app.id).await?;
            }
            Step::Restore => self.restore(ctx).await?,
            Step::MoveLocation => self.move_location(ctx).await?,
            Step::Update => self.packager.update(&ctx.expected_location).await?,
            Step::Uninstall => self.uninstall(ctx).await?,
        }
        Ok(())
    }

    async fn inspect(&self, ctx: &mut ScenarioContext) -> Result<Inspection, ScenarioError> {
        let inspection = self.packager.inspect().await?;
        ctx.api_endpoint = Some(inspection.api_endpoint.clone());
        Ok(inspection)
    }

    /// Inspects and stores the single app at the expected location.
    async fn resolve_app(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        let inspection = self.inspect(ctx).await?;
        let app = select_app(&inspection, &ctx.expected_location)?;
        info!(app_id = %app.id, location = %app.location, fqdn = %app.fqdn, "resolved app");
        ctx.remember(app);
        Ok(())
    }

    async fn install_from_store(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        let appstore_id = ctx
            .manifest_id
            .clone()
            .or_else(|| self.settings.appstore_id.clone())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "packager.appstore_id".to_owned(),
                reason: "required to install from the store when no app was inspected earlier"
                    .to_owned(),
            })?;
        self.packager
            .install(&ctx.expected_location, Some(appstore_id.as_str()))
            .await?;
        self.resolve_app(ctx).await
    }

    async fn restore(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        let old_id = ctx.app(Step::Restore)?.id.clone();

        // 제거 전에 목록을 받아야 방금 만든 백업이 포함됨
        let backups = self.packager.list_backups().await?;
        let backup = newest_backup(&backups)?;
        info!(backup_id = %backup.id, "restoring from backup");

        self.packager.uninstall(&old_id).await?;
        ctx.app = None;
        self.packager.install(&ctx.expected_location, None).await?;
        self.resolve_app(ctx).await?;

        let new_id = ctx.app(Step::Restore)?.id.clone();
        self.packager.restore(&backup.id, &new_id).await?;
        Ok(())
    }

    async fn move_location(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        let app_id = ctx.app(Step::MoveLocation)?.id.clone();
        let from = ctx.expected_location.clone();
        let to = self.settings.moved_location.clone();

        self.browser.clear_cookies().await?;
        self.packager.configure_location(&app_id, &to).await?;

        let inspection = self.inspect(ctx).await?;
        let app = select_app(&inspection, &to)?;
        ensure_vacant(&inspection, &from)?;
        info!(app_id = %app.id, from = %from, to = %to, "app moved");

        ctx.expected_location = to;
        ctx.remember(app);
        Ok(())
    }

    async fn uninstall(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        let app_id = ctx.app(Step::Uninstall)?.id.clone();
        self.packager.uninstall(&app_id).await?;
        ctx.app = None;

        let inspection = self.inspect(ctx).await?;
        ensure_vacant(&inspection, &ctx.expected_location)?;
        Ok(())
    }

    async fn verify_page(&self, url: &str, locators: &[Locator]) -> Result<(), ScenarioError> {
        self.browser.navigate(url).await?;
        for locator in locators {
            wait_for_element(&self.browser, locator, &self.settings.wait).await?;
        }
        debug!(url, "page verified");
        Ok(())
    }
}
