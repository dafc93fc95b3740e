//! Runner construction.

use lifecheck_core::config::LifecheckConfig;
use lifecheck_scenario::{Driver, Runner, ScenarioSettings};

use super::journal::Journal;
use super::mock_browser::MockBrowser;
use super::mock_packager::MockPackager;
use super::mock_transfer::MockTransfer;

pub type MockRunner = Runner<MockPackager, MockBrowser, MockTransfer>;

/// Settings from the default configuration.
pub fn default_settings() -> ScenarioSettings {
    ScenarioSettings::from_config(&LifecheckConfig::default())
}

#[allow(dead_code)]
pub fn runner(
    packager: MockPackager,
    browser: MockBrowser,
    transfer: MockTransfer,
    settings: ScenarioSettings,
) -> MockRunner {
    Runner::new(Driver::new(packager, browser, transfer, settings))
}

/// Runner with well-behaved collaborators sharing `journal`.
#[allow(dead_code)]
pub fn happy_runner(journal: &Journal) -> MockRunner {
    runner(
        MockPackager::new(journal.clone()),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        default_settings(),
    )
}
