//! Assertions for test cases.
//!
//! Each assertion returns [`CaseResult`], so cases chain them with `?`.

use mndl_value::{equals, Comparator, Value};

use crate::error::{AssertionFailure, CaseResult, TestError};

/// Succeeds only when `actual` is the boolean `true`.
///
/// Truthy values such as `1` or `"yes"` fail.
pub fn assert_true(actual: impl Into<Value>) -> CaseResult {
    let actual = actual.into();
    if actual.resolved().as_bool() == Some(true) {
        Ok(())
    } else {
        Err(TestError::Assertion(AssertionFailure::not_true(actual)))
    }
}

/// Succeeds when `actual` and `expected` are structurally equal.
///
/// A comparison that cannot complete, such as one over a cyclic value, fails
/// with [`TestError::Comparison`].
pub fn assert_equals(actual: impl Into<Value>, expected: impl Into<Value>) -> CaseResult {
    let (actual, expected) = (actual.into(), expected.into());
    if equals(&actual, &expected)? {
        Ok(())
    } else {
        Err(TestError::Assertion(AssertionFailure { actual, expected }))
    }
}

/// [`assert_equals`] using `comparator` and its depth limit.
pub fn assert_equals_with(
    comparator: &mut Comparator,
    actual: impl Into<Value>,
    expected: impl Into<Value>,
) -> CaseResult {
    let (actual, expected) = (actual.into(), expected.into());
    if comparator.equals(&actual, &expected)? {
        Ok(())
    } else {
        Err(TestError::Assertion(AssertionFailure { actual, expected }))
    }
}
