//! Update suite.

use lifecheck_scenario::{FailureKind, Step, Suite, SuiteSelection};

use crate::helpers::fixture::*;
use crate::helpers::journal::Journal;
use crate::helpers::mock_browser::MockBrowser;
use crate::helpers::mock_packager::{LOCAL_MANIFEST_ID, MockPackager};
use crate::helpers::mock_transfer::MockTransfer;

#[tokio::test]
async fn update_suite_reuses_package_id_from_lifecycle() {
    let journal = Journal::default();
    let mut runner = happy_runner(&journal);

    let report = runner.run(SuiteSelection::All).await;
    assert!(report.passed);
    assert!(journal.contains(&format!(
        "cloudron install --appstore-id {LOCAL_MANIFEST_ID} --location test"
    )));
}

#[tokio::test]
async fn update_addresses_app_by_location_after_upload() {
    let journal = Journal::default();
    let mut settings = default_settings();
    settings.appstore_id = Some("io.lamp.store".to_owned());
    let mut runner = runner(
        MockPackager::new(journal.clone()),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        settings,
    );

    let report = runner.run_suite(Suite::Update).await;
    assert!(report.passed, "{:?}", report.failure());
    assert_eq!(report.steps.len(), 8);

    let uploaded = journal
        .position("sftp upload test.example.com@my.example.com")
        .expect("uploaded");
    let updated = journal.position("cloudron update --app test").expect("updated");
    assert!(uploaded < updated);

    let verified = journal
        .entries()
        .iter()
        .rposition(|e| e == "browser navigate https://test.example.com/test.php")
        .expect("verified after update");
    assert!(updated < verified);
    assert!(journal.contains("cloudron uninstall --app app-1"));
}

#[tokio::test]
async fn update_suite_alone_needs_configured_package_id() {
    let journal = Journal::default();
    let mut runner = happy_runner(&journal);

    let report = runner.run(SuiteSelection::Update).await;
    let failure = report.suites[0].failure().expect("no package id");
    assert_eq!(failure.name, Step::InstallFromStore);
    assert_eq!(failure.kind, Some(FailureKind::Config));
    assert!(
        failure
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("packager.appstore_id")
    );
    assert_eq!(journal.entries(), vec!["browser quit"]);
}
