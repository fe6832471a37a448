//! Errors raised by test cases and fixtures.
//!
//! Every way a case can fail is folded into [`TestError`]. Because
//! `TestError` is not itself a `std::error::Error`, any error type converts
//! into it with `?`, so a case can propagate parse, I/O, or domain errors
//! unchanged and still get a well-formed failure record.

use std::any::Any;
use std::error::Error;
use std::fmt;

use mndl_value::{EqualityError, Value};

/// Result returned by a test case or fixture.
pub type CaseResult = Result<(), TestError>;

/// An assertion whose actual value did not match the expected one.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error(
    "Expected {}, but {} was returned.",
    .expected.display_value(),
    .actual.display_value()
)]
pub struct AssertionFailure {
    pub actual: Value,
    pub expected: Value,
}

impl AssertionFailure {
    /// Kind label of assertion failures.
    pub const KIND: &'static str = "AssertionError";

    pub fn new(actual: impl Into<Value>, expected: impl Into<Value>) -> Self {
        AssertionFailure {
            actual: actual.into(),
            expected: expected.into(),
        }
    }

    /// `actual` was expected to be `true`.
    pub fn not_true(actual: impl Into<Value>) -> Self {
        AssertionFailure::new(actual, true)
    }

    pub fn kind(&self) -> &'static str {
        Self::KIND
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Why a test case or fixture failed.
#[derive(Debug)]
pub enum TestError {
    /// An assertion did not hold.
    Assertion(AssertionFailure),
    /// Values could not be compared.
    Comparison(EqualityError),
    /// An explicitly raised failure with its own kind label.
    Custom { kind: String, message: String },
    /// The procedure panicked; holds the panic message.
    Panicked { message: String },
    /// Any other error propagated out of the procedure.
    Thrown(Box<dyn Error + Send + Sync>),
}

impl TestError {
    /// Kind label of thrown errors.
    pub const THROWN_KIND: &'static str = "Error";
    /// Kind label of caught panics.
    pub const PANIC_KIND: &'static str = "Panic";

    /// Fail with a custom kind label and message.
    #[cold]
    pub fn raise(kind: impl Into<String>, message: impl Into<String>) -> Self {
        TestError::Custom {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Fail with a plain message.
    #[cold]
    pub fn msg(message: impl Into<String>) -> Self {
        TestError::raise(Self::THROWN_KIND, message)
    }

    /// Build from a payload caught by `std::panic::catch_unwind`.
    #[cold]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else {
            "test panicked".to_string()
        };
        TestError::Panicked { message }
    }

    /// Kind label reported in failure records.
    pub fn kind(&self) -> &str {
        match self {
            TestError::Assertion(failure) => failure.kind(),
            TestError::Comparison(error) => error.kind(),
            TestError::Custom { kind, .. } => kind,
            TestError::Panicked { .. } => Self::PANIC_KIND,
            TestError::Thrown(_) => Self::THROWN_KIND,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TestError::Assertion(failure) => failure.message(),
            TestError::Comparison(error) => error.to_string(),
            TestError::Custom { message, .. } | TestError::Panicked { message } => message.clone(),
            TestError::Thrown(error) => error.to_string(),
        }
    }

    pub fn as_assertion(&self) -> Option<&AssertionFailure> {
        match self {
            TestError::Assertion(failure) => Some(failure),
            _ => None,
        }
    }

    /// Snapshot of this error for a result record.
    pub fn info(&self) -> ErrorInfo {
        let (actual, expected) = match self.as_assertion() {
            Some(failure) => (Some(failure.actual.clone()), Some(failure.expected.clone())),
            None => (None, None),
        };
        ErrorInfo {
            kind: self.kind().to_string(),
            message: self.message(),
            actual,
            expected,
        }
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl<E> From<E> for TestError
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(error);
        let boxed = match boxed.downcast::<AssertionFailure>() {
            Ok(failure) => return TestError::Assertion(*failure),
            Err(boxed) => boxed,
        };
        match boxed.downcast::<EqualityError>() {
            Ok(error) => TestError::Comparison(*error),
            Err(boxed) => TestError::Thrown(boxed),
        }
    }
}

/// What a failure record carries about its error.
///
/// For assertion failures `actual` and `expected` hold the compared values.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorInfo {
    pub kind: String,
    pub message: String,
    pub actual: Option<Value>,
    pub expected: Option<Value>,
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
