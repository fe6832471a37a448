//! Runtime values compared by the test harness.
//!
//! # Construction
//!
//! Composite payloads live behind [`Heap`], whose constructor is private to
//! this module. Use the factory methods or the `From` conversions:
//!
//! ```text
//! let s = Value::string("hello");
//! let nums = Value::list(vec![Value::from(1), Value::from(2)]);
//! let flag = Value::from(true);
//! ```
//!
//! # Classification
//!
//! [`ValueKind`] is the coarse classification the equality engine checks
//! before descending: nullish, primitive, sequence, record, callable. Values
//! of different kinds never compare equal, except `undefined` and `null`.

mod function;
mod heap;
mod shared;

use std::collections::BTreeMap;
use std::fmt;

pub use function::{FunctionValue, NativeFn};
pub use heap::Heap;
pub use shared::SharedRef;

/// A dynamically-typed value.
#[derive(Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value.
    #[default]
    Undefined,
    /// Explicitly empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// IEEE double; the only numeric type.
    Number(f64),
    /// String value.
    Str(Heap<String>),
    /// Ordered, positional sequence.
    List(Heap<Vec<Value>>),
    /// String-keyed mapping. Key order carries no meaning.
    Record(Heap<BTreeMap<String, Value>>),
    /// Callable reference.
    Function(FunctionValue),
    /// Shared mutable cell; compares by identity under `PartialEq`.
    Ref(SharedRef),
}

/// Coarse classification used by the equality engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `undefined` or `null`.
    Nullish,
    /// Boolean, number or string.
    Primitive,
    /// List.
    Sequence,
    /// Record.
    Record,
    /// Function.
    Callable,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Nullish => "nullish",
            ValueKind::Primitive => "primitive",
            ValueKind::Sequence => "sequence",
            ValueKind::Record => "record",
            ValueKind::Callable => "callable",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Factory Methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a record value.
    #[inline]
    pub fn record(fields: BTreeMap<String, Value>) -> Self {
        Value::Record(Heap::new(fields))
    }

    /// Create a record from `(key, value)` pairs. Later keys win.
    pub fn record_from<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create a function value labelled with `source`.
    pub fn function(
        source: impl Into<std::sync::Arc<str>>,
        body: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Value::Function(FunctionValue::new(source, body))
    }

    /// Create a value referring to a fresh shared cell holding `value`.
    pub fn shared(value: Value) -> Self {
        Value::Ref(SharedRef::new(value))
    }
}

// Value Methods

impl Value {
    /// Follow reference cells until a non-reference value is reached.
    ///
    /// A chain of cells that only point at each other resolves to
    /// `Undefined`.
    pub fn resolved(&self) -> Value {
        let mut current = self.clone();
        let mut visited: Vec<usize> = Vec::new();
        while let Value::Ref(cell) = &current {
            let addr = cell.addr();
            if visited.contains(&addr) {
                return Value::Undefined;
            }
            visited.push(addr);
            let next = cell.get();
            current = next;
        }
        current
    }

    /// Classification of this value; references classify as their target.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined | Value::Null => ValueKind::Nullish,
            Value::Bool(_) | Value::Number(_) | Value::Str(_) => ValueKind::Primitive,
            Value::List(_) => ValueKind::Sequence,
            Value::Record(_) => ValueKind::Record,
            Value::Function(_) => ValueKind::Callable,
            Value::Ref(_) => self.resolved().kind(),
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Function(_) => "function",
            Value::Ref(_) => "ref",
        }
    }

    /// `undefined` or `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Try to convert to a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert to a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to convert to a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to convert to a record.
    pub fn as_record(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a record field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|fields| fields.get(key))
    }

    /// Human-readable text, as interpolated into assertion messages.
    ///
    /// Strings are unquoted; cyclic references render as `[Circular]`.
    pub fn display_value(&self) -> String {
        let mut out = String::new();
        self.render(&mut out, false, &mut Vec::new());
        out
    }

    fn render(&self, out: &mut String, quote_strings: bool, open_refs: &mut Vec<usize>) {
        match self {
            Value::Undefined => out.push_str("undefined"),
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => out.push_str(&format_number(*n)),
            Value::Str(s) => {
                if quote_strings {
                    out.push_str(&format!("{:?}", &**s));
                } else {
                    out.push_str(s);
                }
            }
            Value::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    crate::ensure_sufficient_stack(|| item.render(out, quote_strings, open_refs));
                }
                out.push(']');
            }
            Value::Record(fields) => {
                out.push('{');
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(key);
                    out.push_str(": ");
                    crate::ensure_sufficient_stack(|| value.render(out, quote_strings, open_refs));
                }
                out.push('}');
            }
            Value::Function(func) => out.push_str(func.source()),
            Value::Ref(cell) => {
                let addr = cell.addr();
                if open_refs.contains(&addr) {
                    out.push_str("[Circular]");
                    return;
                }
                open_refs.push(addr);
                cell.get().render(out, quote_strings, open_refs);
                open_refs.pop();
            }
        }
    }
}

/// Shortest round-trip text for a number, with `NaN`/`Infinity` spelled out
/// and negative zero shown as `0`.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n:?})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Record(fields) => write!(f, "Record({:?})", &**fields),
            Value::Function(func) => write!(f, "Function({:?})", func.source()),
            // Never descends, so cyclic values can be debug-printed.
            Value::Ref(cell) => write!(f, "Ref({:#x})", cell.addr()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out, true, &mut Vec::new());
        f.write_str(&out)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "numbers are doubles; integers beyond 2^53 round like any other double"
)]
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "numbers are doubles; integers beyond 2^53 round like any other double"
)]
impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "numbers are doubles; lengths beyond 2^53 round like any other double"
)]
impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Value::record(fields)
    }
}

impl From<FunctionValue> for Value {
    fn from(func: FunctionValue) -> Self {
        Value::Function(func)
    }
}

impl From<SharedRef> for Value {
    fn from(cell: SharedRef) -> Self {
        Value::Ref(cell)
    }
}

impl From<&SharedRef> for Value {
    fn from(cell: &SharedRef) -> Self {
        Value::Ref(cell.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::list(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests;
