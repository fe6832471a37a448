//! Test execution engine.
//!
//! Runs the groups of a suite in declaration order. Within a group the setup
//! fixture runs first, then each case in order, then the teardown fixture,
//! which runs even after setup or case failures. Every procedure is isolated:
//! an error or panic becomes a failed record and the run moves on.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::error::{CaseResult, TestError};
use crate::presentation::Presentation;
use crate::result::{GroupSummary, Phase, ResultRecord, RunSummary, Status};
use crate::suite::{TestFn, TestGroup, TestSuite};

/// Environment variable holding the case filter.
pub const FILTER_VAR: &str = "MNDL_TEST_FILTER";
/// Environment variable disabling panic capture when `0` or `false`.
pub const CATCH_PANICS_VAR: &str = "MNDL_CATCH_PANICS";

/// Configuration for the test runner.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Filter cases by description (substring match).
    pub filter: Option<String>,
    /// Report panics as failures instead of unwinding out of the run.
    pub catch_panics: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            filter: None,
            catch_panics: true,
        }
    }
}

impl RunnerConfig {
    /// Read the configuration from `MNDL_TEST_FILTER` and `MNDL_CATCH_PANICS`.
    pub fn from_env() -> Self {
        RunnerConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = lookup(FILTER_VAR).filter(|f| !f.is_empty());
        let catch_panics = lookup(CATCH_PANICS_VAR)
            .is_none_or(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false"));
        RunnerConfig {
            filter,
            catch_panics,
        }
    }

    /// Whether a case described by `description` passes the filter.
    pub fn matches(&self, description: &str) -> bool {
        self.filter
            .as_deref()
            .is_none_or(|filter| description.contains(filter))
    }
}

/// Test runner.
#[derive(Debug, Default)]
pub struct TestRunner {
    config: RunnerConfig,
}

impl TestRunner {
    /// Create a new test runner with default config.
    pub fn new() -> Self {
        TestRunner::default()
    }

    /// Create a test runner with custom config.
    pub fn with_config(config: RunnerConfig) -> Self {
        TestRunner { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every group of `suite`, reporting to `surface`.
    pub fn run<P: Presentation>(&self, suite: TestSuite, surface: &mut P) -> RunSummary {
        let mut summary = RunSummary::new();
        let start = Instant::now();

        for group in suite.into_groups() {
            summary.add_group(self.run_group(group, surface));
        }

        summary.duration = start.elapsed();
        tracing::debug!(
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            "run finished"
        );
        summary
    }

    fn run_group<P: Presentation>(&self, group: TestGroup, surface: &mut P) -> GroupSummary {
        let mut plan = group.into_plan();
        let mut summary = GroupSummary::new(plan.name.as_str());

        let total = plan.cases.len();
        plan.cases.retain(|case| self.config.matches(&case.description));
        summary.skipped = total - plan.cases.len();

        if total > 0 && plan.cases.is_empty() {
            tracing::debug!(group = %plan.name, "all cases filtered out, skipping group");
            return summary;
        }

        tracing::debug!(group = %plan.name, cases = plan.cases.len(), "running group");
        let mut handle = surface.begin_group(&plan.name);

        if let Some(setup) = plan.setup.as_mut() {
            let record = self.run_fixture(Phase::Setup, setup);
            Self::record(&mut summary, surface, &mut handle, record);
        }

        for mut case in plan.cases {
            tracing::trace!(group = %plan.name, case = %case.description, "running case");
            let start = Instant::now();
            let record = match self.attempt(&mut case.run) {
                Ok(()) => ResultRecord::passed(Phase::Case, case.description, start.elapsed()),
                Err(error) => {
                    tracing::warn!(
                        group = %plan.name,
                        case = %case.description,
                        %error,
                        "case failed"
                    );
                    ResultRecord::failed(Phase::Case, case.description, &error, start.elapsed())
                }
            };
            Self::record(&mut summary, surface, &mut handle, record);
        }

        if let Some(teardown) = plan.teardown.as_mut() {
            let record = self.run_fixture(Phase::Teardown, teardown);
            Self::record(&mut summary, surface, &mut handle, record);
        }

        surface.end_group(handle);
        tracing::debug!(
            group = %plan.name,
            passed = summary.passed,
            failed = summary.failed,
            "group finished"
        );
        summary
    }

    fn run_fixture(&self, phase: Phase, fixture: &mut TestFn) -> ResultRecord {
        let start = Instant::now();
        let outcome = self.attempt(fixture);
        let duration = start.elapsed();
        match outcome {
            Ok(()) => ResultRecord::passed(phase, fixture_label(phase, Status::Pass), duration),
            Err(error) => {
                tracing::warn!(%phase, %error, "fixture failed");
                ResultRecord::failed(phase, fixture_label(phase, Status::Fail), &error, duration)
            }
        }
    }

    fn record<P: Presentation>(
        summary: &mut GroupSummary,
        surface: &mut P,
        handle: &mut P::Group,
        record: ResultRecord,
    ) {
        if record.is_reported() {
            surface.report_result(handle, &record);
        }
        summary.add_record(record);
    }

    /// Run one procedure, turning a caught panic into an error.
    fn attempt(&self, run: &mut TestFn) -> CaseResult {
        if !self.config.catch_panics {
            return run();
        }
        match panic::catch_unwind(AssertUnwindSafe(|| run())) {
            Ok(result) => result,
            Err(payload) => {
                let error = TestError::from_panic(payload);
                tracing::warn!(%error, "caught panic");
                Err(error)
            }
        }
    }
}

fn fixture_label(phase: Phase, status: Status) -> &'static str {
    phase.fixture_description(status).unwrap_or_default()
}

/// Run `suite` with a default-configured runner.
pub fn run_suite<P: Presentation>(suite: TestSuite, surface: &mut P) -> RunSummary {
    TestRunner::new().run(suite, surface)
}
