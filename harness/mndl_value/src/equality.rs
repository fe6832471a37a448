//! Structural equality engine.
//!
//! Decides whether two values are "equal enough" for test purposes:
//!
//! 1. `undefined` and `null` are equal to each other.
//! 2. Values of different [`ValueKind`]s are unequal.
//! 3. Lists are equal when they have the same length and are pairwise equal,
//!    position by position.
//! 4. Records are equal when they have the same key set and are equal key by
//!    key. A key holding `undefined` is still a key.
//! 5. Functions are equal when their source texts are identical. This is a
//!    syntactic check only: different closures with the same text are equal.
//! 6. Everything else goes through [`loose_eq`](crate::coerce::loose_eq).
//!
//! # Cycles
//!
//! Reference cells make cyclic values possible. The comparator keeps the heap
//! identities of every composite pair it is currently descending through; if
//! the same pair is reached again further down, the comparison would never
//! terminate and [`EqualityError::Cycle`] is returned instead. Deep but
//! acyclic values compare normally; a depth limit applies only when a
//! [`Comparator`] is built with one.

use std::fmt::{self, Write as _};

use rustc_hash::FxHashSet;

use crate::coerce::loose_eq;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Path segments kept at each end of a rendered path; the middle is elided.
const PATH_EDGE_SEGMENTS: usize = 8;

/// A comparison that cannot produce an answer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EqualityError {
    /// Both sides recurse into the same pair of structures forever.
    #[error("cyclic structure detected at {path}")]
    Cycle { path: String },
    /// Nesting exceeded the comparator's depth limit.
    #[error("comparison exceeded the maximum depth of {limit} at {path}")]
    DepthExceeded { limit: usize, path: String },
}

impl EqualityError {
    /// Kind label reported for every comparison error.
    pub const KIND: &'static str = "CyclicComparisonError";

    pub fn kind(&self) -> &'static str {
        Self::KIND
    }

    /// Location of the failure, rooted at `$`.
    pub fn path(&self) -> &str {
        match self {
            EqualityError::Cycle { path } | EqualityError::DepthExceeded { path, .. } => path,
        }
    }
}

/// One step from a value into a child.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Index(usize),
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(i) => write!(f, "[{i}]"),
            Segment::Key(key) if is_identifier(key) => write!(f, ".{key}"),
            Segment::Key(key) => write!(f, "[{key:?}]"),
        }
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Compare `actual` with `expected` without a depth limit.
pub fn equals(actual: &Value, expected: &Value) -> Result<bool, EqualityError> {
    Comparator::new().equals(actual, expected)
}

/// Reusable comparison state.
///
/// Holds the optional depth limit plus the scratch state of the comparison
/// in progress; each call to [`Comparator::equals`] starts from a clean slate.
#[derive(Debug)]
pub struct Comparator {
    max_depth: Option<usize>,
    depth: usize,
    in_progress: FxHashSet<(usize, usize)>,
    path: Vec<Segment>,
}

impl Default for Comparator {
    fn default() -> Self {
        Comparator::new()
    }
}

impl Comparator {
    /// Create a comparator with no depth limit.
    pub fn new() -> Self {
        Comparator {
            max_depth: None,
            depth: 0,
            in_progress: FxHashSet::default(),
            path: Vec::new(),
        }
    }

    /// Create a comparator that gives up below `max_depth` nesting levels.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Comparator {
            max_depth: Some(max_depth),
            ..Comparator::new()
        }
    }

    /// Compare `actual` with `expected`.
    pub fn equals(&mut self, actual: &Value, expected: &Value) -> Result<bool, EqualityError> {
        self.depth = 0;
        self.in_progress.clear();
        self.path.clear();

        let result = self.compare(actual, expected);
        if let Err(error) = &result {
            tracing::debug!(%error, "comparison aborted");
        }
        result
    }

    fn compare(&mut self, actual: &Value, expected: &Value) -> Result<bool, EqualityError> {
        if let Some(limit) = self.max_depth.filter(|&limit| self.depth > limit) {
            return Err(EqualityError::DepthExceeded {
                limit,
                path: self.render_path(),
            });
        }

        let pair = identity(actual).zip(identity(expected));
        if let Some(pair) = pair {
            if !self.in_progress.insert(pair) {
                return Err(EqualityError::Cycle {
                    path: self.render_path(),
                });
            }
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.compare_values(actual, expected));
        self.depth -= 1;

        if let Some(pair) = pair {
            self.in_progress.remove(&pair);
        }
        result
    }

    fn compare_values(&mut self, actual: &Value, expected: &Value) -> Result<bool, EqualityError> {
        match (actual, expected) {
            (Value::Ref(cell), _) => return self.compare(&cell.get(), expected),
            (_, Value::Ref(cell)) => return self.compare(actual, &cell.get()),
            (Value::Undefined, Value::Null) | (Value::Null, Value::Undefined) => return Ok(true),
            _ => {}
        }

        if actual.kind() != expected.kind() {
            return Ok(false);
        }

        match (actual, expected) {
            (Value::List(a), Value::List(b)) => self.compare_lists(a, b),
            (Value::Record(a), Value::Record(b)) => self.compare_records(a, b),
            (Value::Function(a), Value::Function(b)) => Ok(a.source() == b.source()),
            _ => Ok(loose_eq(actual, expected)),
        }
    }

    fn compare_lists(&mut self, a: &[Value], b: &[Value]) -> Result<bool, EqualityError> {
        if a.len() != b.len() {
            return Ok(false);
        }
        for (index, (x, y)) in a.iter().zip(b).enumerate() {
            self.path.push(Segment::Index(index));
            let equal = self.compare(x, y)?;
            self.path.pop();
            if !equal {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn compare_records(
        &mut self,
        a: &std::collections::BTreeMap<String, Value>,
        b: &std::collections::BTreeMap<String, Value>,
    ) -> Result<bool, EqualityError> {
        if a.len() != b.len() || a.keys().any(|key| !b.contains_key(key)) {
            return Ok(false);
        }
        for (key, x) in a {
            let Some(y) = b.get(key) else {
                return Ok(false);
            };
            self.path.push(Segment::Key(key.clone()));
            let equal = self.compare(x, y)?;
            self.path.pop();
            if !equal {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// `$`-rooted path to the current position. Long paths keep their first
    /// and last segments around an `...` marker.
    fn render_path(&self) -> String {
        let mut out = String::from("$");
        let len = self.path.len();
        if len <= 2 * PATH_EDGE_SEGMENTS {
            for segment in &self.path {
                let _ = write!(out, "{segment}");
            }
            return out;
        }
        for segment in &self.path[..PATH_EDGE_SEGMENTS] {
            let _ = write!(out, "{segment}");
        }
        out.push_str("...");
        for segment in &self.path[len - PATH_EDGE_SEGMENTS..] {
            let _ = write!(out, "{segment}");
        }
        out
    }
}

/// Heap identity of values that can take part in a cycle.
fn identity(value: &Value) -> Option<usize> {
    match value {
        Value::List(items) => Some(items.addr()),
        Value::Record(fields) => Some(fields.addr()),
        Value::Ref(cell) => Some(cell.addr()),
        _ => None,
    }
}
