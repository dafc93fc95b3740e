//! Happy-path lifecycle suite: exact call sequence and final state.

use lifecheck_scenario::{StepStatus, Suite, SuiteSelection};

use crate::helpers::fixture::*;
use crate::helpers::journal::Journal;
use crate::helpers::mock_browser::MockBrowser;
use crate::helpers::mock_packager::MockPackager;
use crate::helpers::mock_transfer::MockTransfer;

const WELCOME: &str = r#"//*[contains(text(), "Cloudron LAMP App")]"#;
const UPLOAD: &str = r#"//*[text()="this works"]"#;
const FEATURE: &str = r#"//a[contains(text(), "ionCube Loader")]"#;

fn verify_uploaded(fqdn: &str) -> Vec<String> {
    vec![
        format!("browser navigate https://{fqdn}/test.php"),
        format!("browser saw {UPLOAD}"),
        format!(r#"browser saw //*[text()="{fqdn}"]"#),
    ]
}

fn verify_feature(fqdn: &str) -> Vec<String> {
    vec![
        format!("browser navigate https://{fqdn}/test.php"),
        format!("browser saw {FEATURE}"),
    ]
}

#[tokio::test]
async fn lifecycle_suite_runs_every_step_in_order() {
    let journal = Journal::default();
    let mut runner = happy_runner(&journal);

    let report = runner.run_suite(Suite::Lifecycle).await;
    assert!(report.passed, "lifecycle should pass: {:?}", report.failure());
    assert_eq!(report.steps.len(), 13);
    assert!(report.steps.iter().all(|s| s.status == StepStatus::Passed));

    let mut expected: Vec<String> = vec![
        "cloudron install --location test".to_owned(),
        "cloudron inspect".to_owned(),
        "browser navigate https://test.example.com".to_owned(),
        format!("browser saw {WELCOME}"),
        "sftp upload test.example.com@my.example.com".to_owned(),
    ];
    expected.extend(verify_uploaded("test.example.com"));
    expected.extend(verify_feature("test.example.com"));
    expected.extend(
        [
            "cloudron backup create --app app-1",
            "cloudron backup list --raw",
            "cloudron uninstall --app app-1",
            "cloudron install --location test",
            "cloudron inspect",
            "cloudron restore --backup backup-1 --app app-2",
        ]
        .map(str::to_owned),
    );
    expected.extend(verify_uploaded("test.example.com"));
    expected.extend(
        [
            "browser clear-cookies",
            "cloudron configure --location test2 --app app-2",
            "cloudron inspect",
        ]
        .map(str::to_owned),
    );
    expected.extend(verify_uploaded("test2.example.com"));
    expected.extend(verify_feature("test2.example.com"));
    expected.extend(["cloudron uninstall --app app-2", "cloudron inspect"].map(str::to_owned));

    assert_eq!(journal.entries(), expected);
    assert!(runner.driver().packager().apps().is_empty());
}

#[tokio::test]
async fn build_step_runs_first_when_enabled() {
    let journal = Journal::default();
    let mut settings = default_settings();
    settings.build = true;
    let mut runner = runner(
        MockPackager::new(journal.clone()),
        MockBrowser::new(journal.clone()),
        MockTransfer::new(journal.clone()),
        settings,
    );

    let report = runner.run_suite(Suite::Lifecycle).await;
    assert!(report.passed);
    assert_eq!(report.steps[0].name.name(), "build");
    assert_eq!(journal.entries()[0], "cloudron build");
}

#[tokio::test]
async fn full_run_passes_and_quits_browser_once() {
    let journal = Journal::default();
    let mut runner = happy_runner(&journal);

    let report = runner.run(SuiteSelection::All).await;
    assert!(report.passed);
    assert_eq!(report.suites.len(), 2);
    assert_eq!(
        journal.entries().last().map(String::as_str),
        Some("browser quit")
    );
    assert_eq!(journal.with_prefix("browser quit").len(), 1);
}

#[tokio::test]
async fn uploads_target_current_fqdn_and_api_endpoint() {
    let journal = Journal::default();
    let mut runner = happy_runner(&journal);

    runner.run(SuiteSelection::All).await;
    assert_eq!(
        journal.with_prefix("sftp upload "),
        vec!["test.example.com@my.example.com", "test.example.com@my.example.com"]
    );
}
