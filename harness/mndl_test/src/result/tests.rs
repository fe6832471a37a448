use super::*;
use pretty_assertions::assert_eq;

fn case_pass(name: &str) -> ResultRecord {
    ResultRecord::passed(Phase::Case, name, Duration::from_millis(1))
}

fn case_fail(name: &str) -> ResultRecord {
    ResultRecord::failed(Phase::Case, name, &TestError::msg("boom"), Duration::from_millis(2))
}

#[test]
fn test_record_constructors() {
    let pass = case_pass("a");
    assert!(pass.is_passed());
    assert!(pass.error.is_none());

    let fail = case_fail("b");
    assert!(fail.is_failed());
    assert_eq!(fail.error.as_ref().map(|e| e.kind.as_str()), Some("Error"));
    assert_eq!(fail.status.as_str(), "fail");
}

#[test]
fn test_fixture_records_reported_only_on_failure() {
    let setup_ok = ResultRecord::passed(Phase::Setup, "setup()", Duration::ZERO);
    let teardown_err = ResultRecord::failed(
        Phase::Teardown,
        "Error during teardown()",
        &TestError::msg("x"),
        Duration::ZERO,
    );
    assert!(!setup_ok.is_reported());
    assert!(teardown_err.is_reported());
    assert!(case_pass("a").is_reported());
}

#[test]
fn test_fixture_descriptions() {
    assert_eq!(Phase::Setup.fixture_description(Status::Pass), Some("setup()"));
    assert_eq!(
        Phase::Setup.fixture_description(Status::Fail),
        Some("Error during setup()")
    );
    assert_eq!(
        Phase::Teardown.fixture_description(Status::Fail),
        Some("Error during teardown()")
    );
    assert_eq!(Phase::Case.fixture_description(Status::Pass), None);
}

#[test]
fn test_group_summary_counts() {
    let mut group = GroupSummary::new("g");
    group.add_record(ResultRecord::passed(Phase::Setup, "setup()", Duration::ZERO));
    group.add_record(case_fail("a"));
    group.add_record(case_pass("b"));
    group.skipped = 1;

    assert_eq!(group.passed, 1);
    assert_eq!(group.failed, 1);
    assert_eq!(group.fixture_failures, 0);
    assert_eq!(group.total(), 3);
    assert_eq!(group.duration, Duration::from_millis(3));
    assert!(group.has_failures());
    assert_eq!(group.reported().count(), 2);
}

#[test]
fn test_fixture_failure_fails_group() {
    let mut group = GroupSummary::new("g");
    group.add_record(ResultRecord::failed(
        Phase::Setup,
        "Error during setup()",
        &TestError::msg("x"),
        Duration::ZERO,
    ));
    group.add_record(case_pass("a"));
    assert_eq!(group.failed, 0);
    assert!(group.has_failures());
}

#[test]
fn test_run_summary_aggregates() {
    let mut first = GroupSummary::new("first");
    first.add_record(case_fail("a"));
    let mut second = GroupSummary::new("second");
    second.add_record(case_pass("b"));
    second.add_record(case_pass("c"));

    let mut summary = RunSummary::new();
    summary.add_group(first);
    summary.add_group(second);

    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.exit_code(), 1);
    assert_eq!(
        summary.failed_groups().map(|g| g.name.as_str()).collect::<Vec<_>>(),
        vec!["first"]
    );
    assert_eq!(summary.group("second").map(GroupSummary::total), Some(2));
    assert_eq!(summary.to_string(), "2 passed, 1 failed, 0 skipped (3 total)");
}

#[test]
fn test_exit_codes() {
    assert_eq!(RunSummary::new().exit_code(), 2);

    let mut group = GroupSummary::new("g");
    group.add_record(case_pass("a"));
    let mut summary = RunSummary::new();
    summary.add_group(group);
    assert_eq!(summary.exit_code(), 0);
}
