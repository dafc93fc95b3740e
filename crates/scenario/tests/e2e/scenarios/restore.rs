//! Backup and restore.

use chrono::{TimeZone, Utc};
use lifecheck_core::types::BackupRecord;
use lifecheck_scenario::{FailureKind, Step, Suite};

use crate::helpers::fixture::*;
use crate::helpers::journal::Journal;
use crate::helpers::mock_browser::MockBrowser;
use crate::helpers::mock_packager::MockPackager;
use crate::helpers::mock_transfer::MockTransfer;

fn backup(id: &str, month: u32) -> BackupRecord {
    BackupRecord {
        id: id.to_owned(),
        creation_time: Utc.with_ymd_and_hms(2030, month, 1, 0, 0, 0).single(),
    }
}

#[tokio::test]
async fn backups_are_listed_before_uninstall() {
    let journal = Journal::default();
    let mut runner = happy_runner(&journal);

    runner.run_suite(Suite::Lifecycle).await;
    let listed = journal.position("cloudron backup list --raw").expect("listed");
    let removed = journal
        .position("cloudron uninstall --app app-1")
        .expect("uninstalled");
    assert!(listed < removed);
}

#[tokio::test]
async fn restore_picks_newest_backup_by_timestamp() {
    let journal = Journal::default();
    // 목록 순서와 무관하게 가장 늦은 creationTime이 선택되어야 함
    let packager = MockPackager::new(journal.clone())
        .with_backups(vec![backup("older", 2), backup("newest", 6), backup("oldest", 1)]);
    let mut runner = runner(
        packager,
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    assert!(report.passed, "{:?}", report.failure());
    assert!(journal.contains("cloudron restore --backup newest --app app-2"));
}

#[tokio::test]
async fn restore_targets_reinstalled_app() {
    let journal = Journal::default();
    let mut runner = happy_runner(&journal);

    runner.run_suite(Suite::Lifecycle).await;
    let restore = journal.with_prefix("cloudron restore ");
    assert_eq!(restore, vec!["--backup backup-1 --app app-2"]);
}

#[tokio::test]
async fn failed_backup_stops_before_restore() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()).failing("backup create --app app-1"),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    let failure = report.failure().expect("backup fails");
    assert_eq!(failure.name, Step::Backup);
    assert_eq!(failure.kind, Some(FailureKind::Process));
    assert!(!journal.contains("cloudron backup list --raw"));
}

#[tokio::test]
async fn duplicate_apps_fail_inspect() {
    let journal = Journal::default();
    let mut runner = runner(
        MockPackager::new(journal.clone()).duplicate_installs(),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        default_settings(),
    );

    // 첫 install 직후 이미 두 개가 보임
    let report = runner.run_suite(Suite::Lifecycle).await;
    let failure = report.failure().expect("ambiguous inspect");
    assert_eq!(failure.name, Step::Inspect);
    assert!(
        failure
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("exactly one app")
    );
}
