//! Shared mutable reference cells.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::Value;

/// A mutable cell shared between every value that refers to it.
///
/// This is the only way to build self-referential structures: store a
/// `Value::Ref` to the cell inside the value the cell holds. Equality through
/// [`PartialEq`] is identity; structural comparison goes through the
/// equality engine, which detects the resulting cycles.
#[derive(Clone)]
pub struct SharedRef(Arc<RwLock<Value>>);

impl SharedRef {
    /// Create a cell holding `value`.
    pub fn new(value: Value) -> Self {
        SharedRef(Arc::new(RwLock::new(value)))
    }

    /// Clone of the value currently held.
    ///
    /// The lock is released before returning, so the result can be inspected
    /// while other holders of the cell read it.
    pub fn get(&self) -> Value {
        self.0.read().clone()
    }

    /// Replace the held value.
    pub fn set(&self, value: Value) {
        *self.0.write() = value;
    }

    /// Address of the cell, identifying it across clones.
    #[inline]
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Whether both handles refer to the same cell.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for SharedRef {
    fn eq(&self, other: &Self) -> bool {
        SharedRef::ptr_eq(self, other)
    }
}

impl fmt::Debug for SharedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedRef({:#x})", self.addr())
    }
}
