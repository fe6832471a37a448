//! Dynamic values for the mndl test harness.
//!
//! Test cases compare values whose shape is only known at runtime: nullish
//! markers, loosely-typed primitives, sequences, string-keyed records,
//! callables, and shared reference cells. This crate provides:
//!
//! - [`Value`]: the closed set of value kinds, built through factory methods
//! - [`coerce`]: the primitive coercion rules behind loose equality
//! - [`equality`]: the recursive equality engine with cycle detection
//!
//! # Building values
//!
//! ```text
//! use mndl_value::{list, record, Value};
//!
//! let point = record! { "x" => 1, "y" => 2 };
//! let path = list![point.clone(), record! { "x" => 3, "y" => 4 }];
//! assert!(mndl_value::equals(&path, &path)?);
//! ```

pub mod coerce;
pub mod equality;
mod stack;
mod value;

pub use equality::{equals, Comparator, EqualityError};
pub use stack::ensure_sufficient_stack;
pub use value::{FunctionValue, Heap, NativeFn, SharedRef, Value, ValueKind};

/// Build a [`Value::List`] from expressions convertible into [`Value`].
///
/// ```text
/// let nums = list![1, 2, 3];
/// let nested = list![1, list![2, 3]];
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::Value::list(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::list(::std::vec![$($crate::Value::from($item)),+])
    };
}

/// Build a [`Value::Record`] from `key => value` pairs.
///
/// Later duplicates of a key overwrite earlier ones.
#[macro_export]
macro_rules! record {
    () => {
        $crate::Value::record(::std::collections::BTreeMap::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = ::std::collections::BTreeMap::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        $crate::Value::record(fields)
    }};
}

/// Build a [`Value::Function`] from a closure, capturing its source text.
///
/// Two functions built from textually identical closures compare equal.
#[macro_export]
macro_rules! function {
    ($body:expr) => {
        $crate::Value::function(::std::stringify!($body), $body)
    };
}
