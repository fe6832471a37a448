//! Grouped test runner and assertion library.
//!
//! A [`TestSuite`] is an ordered list of [`TestGroup`]s. Each group holds
//! named cases plus optional `setup` and `teardown` fixtures. The
//! [`TestRunner`] executes every group in order, isolating each case so one
//! failure never stops the rest, and streams a [`ResultRecord`] per outcome to
//! a [`Presentation`] surface.
//!
//! Cases return [`CaseResult`]; assertion failures, comparison errors, and any
//! `std::error::Error` propagated with `?` all become failed records. Panics
//! are caught and reported the same way.
//!
//! ```text
//! use mndl_test::{assert_equals, run_suite, ResultLog, TestGroup, TestSuite};
//!
//! let suite = TestSuite::new().group(
//!     TestGroup::new("arithmetic")
//!         .case("adds", || assert_equals(1 + 1, 2))
//!         .case("parses", || assert_equals("42".parse::<i32>()?, 42)),
//! );
//! let mut log = ResultLog::new();
//! let summary = run_suite(suite, &mut log);
//! assert!(!summary.has_failures());
//! ```

mod assert;
mod error;
mod presentation;
mod result;
mod runner;
mod suite;

pub use assert::{assert_equals, assert_equals_with, assert_true};
pub use error::{AssertionFailure, CaseResult, ErrorInfo, TestError};
pub use presentation::{
    ConsoleGroup, ConsoleSurface, LogGroup, LoggedGroup, Presentation, ResultLog,
};
pub use result::{GroupSummary, Phase, ResultRecord, RunSummary, Status};
pub use runner::{run_suite, RunnerConfig, TestRunner, CATCH_PANICS_VAR, FILTER_VAR};
pub use suite::{GroupPlan, TestCase, TestFn, TestGroup, TestSuite, SETUP, TEARDOWN};

pub use mndl_value::{
    equals, function, list, record, Comparator, EqualityError, SharedRef, Value, ValueKind,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging test runs.
///
/// Set `RUST_LOG` to enable output, e.g. `RUST_LOG=mndl_test=debug`. Safe to
/// call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
