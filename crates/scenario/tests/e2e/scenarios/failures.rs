//! Fail-fast semantics and suite independence.

use std::sync::atomic::Ordering;

use lifecheck_browser::WaitPhase;
use lifecheck_scenario::{FailureKind, Step, StepStatus, Suite, SuiteSelection};

use crate::helpers::fixture::*;
use crate::helpers::journal::Journal;
use crate::helpers::mock_browser::MockBrowser;
use crate::helpers::mock_packager::MockPackager;
use crate::helpers::mock_transfer::MockTransfer;

#[tokio::test]
async fn failed_install_marks_rest_not_run() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()).failing("install --location test"),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    assert!(!report.passed);
    assert_eq!(report.steps[0].status, StepStatus::Failed);
    assert_eq!(report.steps[0].kind, Some(FailureKind::Process));
    assert!(
        report.steps[0]
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("cloudron install --location test")
    );
    assert_eq!(report.count(StepStatus::NotRun), 12);
    assert_eq!(journal.entries(), vec!["cloudron install --location test"]);
}

#[tokio::test(start_paused = true)]
async fn missing_welcome_marker_times_out() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()),
        MockBrowser::new(journal.clone()).missing("Cloudron LAMP App"),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    let failure = report.failure().expect("welcome page fails");
    assert_eq!(failure.name, Step::VerifyWelcomePage);
    assert_eq!(failure.kind, Some(FailureKind::Timeout));
    assert_eq!(failure.duration_ms, 50_000);
    assert!(!journal.contains("sftp upload test.example.com@my.example.com"));
}

#[tokio::test(start_paused = true)]
async fn hidden_element_costs_both_wait_budgets() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()),
        MockBrowser::new(journal.clone()).hidden("Cloudron LAMP App"),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    let failure = report.failure().expect("welcome page fails");
    assert_eq!(failure.kind, Some(FailureKind::Timeout));
    assert!(
        failure
            .error
            .as_deref()
            .unwrap_or_default()
            .contains(&WaitPhase::Visible.to_string())
    );
    // 존재 확인은 즉시 성공, 가시성 대기에 전체 타임아웃 소요
    assert_eq!(failure.duration_ms, 50_000);
}

#[tokio::test(start_paused = true)]
async fn missing_feature_indicator_is_a_failure() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()),
        MockBrowser::new(journal.clone()).missing("ionCube Loader"),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    let failure = report.failure().expect("feature page fails");
    assert_eq!(failure.name, Step::VerifyFeaturePage);
    assert!(!journal.contains("cloudron backup create --app app-1"));
}

#[tokio::test]
async fn failed_upload_surfaces_rerun_hint() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()).failing(),
        default_settings(),
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    let failure = report.failure().expect("upload fails");
    assert_eq!(failure.name, Step::UploadFile);
    assert_eq!(failure.kind, Some(FailureKind::Process));
    assert!(
        failure
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("sshpass -p\"$PASSWORD\"")
    );
}

#[tokio::test]
async fn uninstall_must_vacate_location() {
    let journal = Journal::default();
    let mut settings = default_settings();
    settings.appstore_id = Some("io.lamp.store".to_owned());
    let mut runner = runner(
        MockPackager::new(journal.clone()).ignore_uninstall(),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        settings,
    );
    let report = runner.run_suite(Suite::Update).await;
    let failure = report.failure().expect("uninstall leaves app behind");
    assert_eq!(failure.name, Step::Uninstall);
    assert_eq!(failure.kind, Some(FailureKind::Assertion));
}

#[tokio::test]
async fn update_suite_runs_after_lifecycle_failure() {
    let journal = Journal::default();
    let mut settings = default_settings();
    settings.appstore_id = Some("io.lamp.store".to_owned());
    let mut runner = runner(
        MockPackager::new(journal.clone()).failing("install --location test"),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        settings,
    );

    let report = runner.run(SuiteSelection::All).await;
    assert!(!report.passed);
    assert!(!report.suites[0].passed);
    assert!(report.suites[1].passed, "{:?}", report.suites[1].failure());
    assert!(journal.contains("cloudron install --appstore-id io.lamp.store --location test"));
    assert_eq!(runner.driver().browser().quit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn browser_is_closed_even_when_every_suite_fails() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()).failing("inspect"),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    let report = runner.run(SuiteSelection::All).await;
    assert!(report.suites.iter().all(|s| !s.passed));
    assert_eq!(runner.driver().browser().quit_calls.load(Ordering::SeqCst), 1);
}
