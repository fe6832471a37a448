//! Test result types.

use std::fmt;
use std::time::Duration;

use crate::error::{ErrorInfo, TestError};

/// Outcome of a single case or fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
        }
    }
}

/// Which part of a group produced a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Case,
    Teardown,
}

impl Phase {
    /// Description of a fixture record for `status`; `None` for cases,
    /// which are described by their own name.
    pub fn fixture_description(self, status: Status) -> Option<&'static str> {
        match (self, status) {
            (Phase::Setup, Status::Pass) => Some("setup()"),
            (Phase::Setup, Status::Fail) => Some("Error during setup()"),
            (Phase::Teardown, Status::Pass) => Some("teardown()"),
            (Phase::Teardown, Status::Fail) => Some("Error during teardown()"),
            (Phase::Case, _) => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Setup => "setup",
            Phase::Case => "case",
            Phase::Teardown => "teardown",
        })
    }
}

/// Result of running a single case or fixture.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRecord {
    pub status: Status,
    pub phase: Phase,
    pub description: String,
    /// Present exactly when `status` is [`Status::Fail`].
    pub error: Option<ErrorInfo>,
    pub duration: Duration,
}

impl ResultRecord {
    /// Create a passed record.
    pub fn passed(phase: Phase, description: impl Into<String>, duration: Duration) -> Self {
        ResultRecord {
            status: Status::Pass,
            phase,
            description: description.into(),
            error: None,
            duration,
        }
    }

    /// Create a failed record.
    #[cold]
    pub fn failed(
        phase: Phase,
        description: impl Into<String>,
        error: &TestError,
        duration: Duration,
    ) -> Self {
        ResultRecord {
            status: Status::Fail,
            phase,
            description: description.into(),
            error: Some(error.info()),
            duration,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == Status::Pass
    }

    pub fn is_failed(&self) -> bool {
        self.status == Status::Fail
    }

    /// Whether the record is shown on a presentation surface.
    ///
    /// Successful fixtures are kept in summaries but not reported.
    pub fn is_reported(&self) -> bool {
        self.phase == Phase::Case || self.is_failed()
    }
}

/// Summary of one group's run.
#[derive(Clone, Debug, Default)]
pub struct GroupSummary {
    pub name: String,
    /// Every record produced, fixtures included, in run order.
    pub records: Vec<ResultRecord>,
    /// Number of cases that passed.
    pub passed: usize,
    /// Number of cases that failed.
    pub failed: usize,
    /// Number of cases excluded by the filter.
    pub skipped: usize,
    /// Number of fixtures that failed.
    pub fixture_failures: usize,
    pub duration: Duration,
}

impl GroupSummary {
    pub fn new(name: impl Into<String>) -> Self {
        GroupSummary {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_record(&mut self, record: ResultRecord) {
        match (record.phase, record.status) {
            (Phase::Case, Status::Pass) => self.passed += 1,
            (Phase::Case, Status::Fail) => self.failed += 1,
            (_, Status::Fail) => self.fixture_failures += 1,
            (_, Status::Pass) => {}
        }
        self.duration += record.duration;
        self.records.push(record);
    }

    /// Number of cases, skipped ones included.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// Whether any case, setup or teardown failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.fixture_failures > 0
    }

    /// Records a presentation surface received.
    pub fn reported(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter().filter(|r| r.is_reported())
    }
}

/// Overall summary of a run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub groups: Vec<GroupSummary>,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub fixture_failures: usize,
    pub duration: Duration,
}

impl RunSummary {
    pub fn new() -> Self {
        RunSummary::default()
    }

    pub fn add_group(&mut self, summary: GroupSummary) {
        self.passed += summary.passed;
        self.failed += summary.failed;
        self.skipped += summary.skipped;
        self.fixture_failures += summary.fixture_failures;
        self.duration += summary.duration;
        self.groups.push(summary);
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.fixture_failures > 0
    }

    pub fn group(&self, name: &str) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn failed_groups(&self) -> impl Iterator<Item = &GroupSummary> {
        self.groups.iter().filter(|g| g.has_failures())
    }

    /// Get exit code: 0 = all pass, 1 = failures, 2 = no cases ran.
    pub fn exit_code(&self) -> i32 {
        if self.passed + self.failed == 0 && self.fixture_failures == 0 {
            2
        } else {
            i32::from(self.has_failures())
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped ({} total)",
            self.passed,
            self.failed,
            self.skipped,
            self.total()
        )?;
        if self.fixture_failures > 0 {
            write!(f, ", {} fixture failures", self.fixture_failures)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
