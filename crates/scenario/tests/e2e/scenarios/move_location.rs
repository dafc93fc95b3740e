//! Moving the app between locations.

use lifecheck_scenario::{FailureKind, Step, StepStatus, Suite};

use crate::helpers::fixture::*;
use crate::helpers::journal::Journal;
use crate::helpers::mock_browser::MockBrowser;
use crate::helpers::mock_packager::MockPackager;
use crate::helpers::mock_transfer::MockTransfer;

#[tokio::test]
async fn cookies_are_cleared_before_configure() {
    let journal = Journal::default();
    let mut runner = happy_runner(&journal);

    runner.run_suite(Suite::Lifecycle).await;
    let cleared = journal.position("browser clear-cookies").expect("cookies cleared");
    let configured = journal
        .position("cloudron configure --location test2 --app app-2")
        .expect("configure ran");
    assert!(cleared < configured);
}

#[tokio::test]
async fn app_missing_at_new_location_fails_move() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()).ignore_configure(),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    let failure = report.failure().expect("move should fail");
    assert_eq!(failure.name, Step::MoveLocation);
    assert_eq!(failure.kind, Some(FailureKind::Assertion));
    assert!(
        failure
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("test2"),
        "error should name the new location: {:?}",
        failure.error
    );
    assert!(!journal.contains("browser navigate https://test2.example.com/test.php"));
}

#[tokio::test]
async fn app_still_at_old_location_fails_move() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()).copy_on_configure(),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    let failure = report.failure().expect("move should fail");
    assert_eq!(failure.name, Step::MoveLocation);
    assert_eq!(failure.kind, Some(FailureKind::Assertion));
    let error = failure.error.as_deref().unwrap_or_default();
    assert!(
        error.contains("app 'app-2' is still installed at location 'test'"),
        "error should name the old location: {error}"
    );
    assert!(journal.contains("cloudron configure --location test2 --app app-2"));
    assert!(!journal.contains("browser navigate https://test2.example.com/test.php"));
}

#[tokio::test]
async fn custom_moved_location_is_used() {
    let journal = Journal::default();
    let mut settings = default_settings();
    settings.moved_location = "elsewhere".to_owned();
    let mut runner = runner(
        MockPackager::new(journal.clone()),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        settings,
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    assert!(report.passed);
    assert!(journal.contains("cloudron configure --location elsewhere --app app-2"));
    assert!(journal.contains("browser navigate https://elsewhere.example.com/test.php"));
    assert!(
        report
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Passed)
    );
}
