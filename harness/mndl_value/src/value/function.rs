//! Callable values.

use std::fmt;
use std::sync::Arc;

use super::Value;

/// Native body of a callable value.
pub type NativeFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A callable reference together with the source text it was built from.
///
/// Equality between functions is syntactic: two functions are equal when
/// their source texts are identical, regardless of what their bodies do.
/// Closures built by the `function!` macro record their own tokens as source.
#[derive(Clone)]
pub struct FunctionValue {
    source: Arc<str>,
    body: Arc<NativeFn>,
}

impl FunctionValue {
    /// Wrap `body`, labelled with `source`.
    pub fn new(
        source: impl Into<Arc<str>>,
        body: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        FunctionValue {
            source: source.into(),
            body: Arc::new(body),
        }
    }

    /// The source text this function compares by.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.body)(args)
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionValue({:?})", &*self.source)
    }
}
