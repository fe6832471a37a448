use std::time::Duration;

use super::*;
use crate::error::TestError;
use crate::result::{GroupSummary, Phase};
use pretty_assertions::assert_eq;

fn pass(name: &str) -> ResultRecord {
    ResultRecord::passed(Phase::Case, name, Duration::ZERO)
}

fn fail(name: &str) -> ResultRecord {
    ResultRecord::failed(Phase::Case, name, &TestError::msg("boom"), Duration::ZERO)
}

fn console_text(surface: ConsoleSurface<Vec<u8>>) -> String {
    String::from_utf8(surface.into_inner()).unwrap_or_default()
}

#[test]
fn test_result_log_records_stream() {
    let mut log = ResultLog::new();

    let mut first = log.begin_group("first");
    log.report_result(&mut first, &pass("a"));
    log.report_result(&mut first, &fail("b"));
    log.end_group(first);

    let mut second = log.begin_group("second");
    log.report_result(&mut second, &pass("c"));

    let groups = log.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].descriptions().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(groups[0].failed);
    assert!(groups[0].closed);
    assert!(!groups[1].failed);
    assert!(!groups[1].closed);
    assert_eq!(
        log.failed_groups().map(|g| g.name.as_str()).collect::<Vec<_>>(),
        vec!["first"]
    );

    log.end_group(second);
}

#[test]
fn test_result_log_reveal() {
    let mut log = ResultLog::new();
    assert!(!log.is_revealed());
    log.reveal();
    assert!(log.is_revealed());
}

#[test]
fn test_console_buffers_until_reveal() {
    let mut console = ConsoleSurface::new(Vec::new());
    let mut group = console.begin_group("math");
    console.report_result(&mut group, &fail("divides"));
    console.end_group(group);

    assert_eq!(console.pending(), "math [FAIL]\n  FAIL: divides - Error: boom\n");
    assert!(console.sink.is_empty());

    console.reveal();
    assert_eq!(console.pending(), "");
    assert_eq!(console_text(console), "math [FAIL]\n  FAIL: divides - Error: boom\n");
}

#[test]
fn test_console_hides_passing_groups_unless_verbose() {
    let mut quiet = ConsoleSurface::new(Vec::new());
    let mut group = quiet.begin_group("ok");
    quiet.report_result(&mut group, &pass("a"));
    quiet.end_group(group);
    assert_eq!(quiet.pending(), "");

    let mut loud = ConsoleSurface::new(Vec::new()).verbose(true);
    let mut group = loud.begin_group("ok");
    loud.report_result(&mut group, &pass("a"));
    loud.end_group(group);
    assert_eq!(loud.pending(), "ok [pass]\n  PASS: a\n");
}

#[test]
fn test_console_quiet_failure_omits_pass_lines() {
    let mut console = ConsoleSurface::new(Vec::new());
    let mut group = console.begin_group("g");
    console.report_result(&mut group, &pass("a"));
    console.report_result(&mut group, &fail("b"));
    console.end_group(group);
    assert_eq!(console.pending(), "g [FAIL]\n  FAIL: b - Error: boom\n");
}

#[test]
fn test_console_summary_block() {
    let mut group = GroupSummary::new("g");
    group.add_record(pass("a"));
    let mut summary = RunSummary::new();
    summary.add_group(group);

    let mut console = ConsoleSurface::new(Vec::new());
    console.summarize(&summary);
    let text = console.pending();
    assert!(text.contains("1 passed, 0 failed, 0 skipped (1 total)"));
    assert!(text.ends_with("OK\n"));
}

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_console_write_error_keeps_pending() {
    let mut console = ConsoleSurface::new(BrokenSink).verbose(true);
    let group = console.begin_group("g");
    console.end_group(group);
    console.reveal();
    assert_eq!(console.pending(), "g [pass]\n");
}
