//! Reference-counted storage for composite payloads.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Shared, immutable heap allocation backing strings, lists and records.
///
/// The constructor is private to the `value` module, so composite values can
/// only be created through the factory methods on [`Value`](super::Value).
/// Cloning a `Heap` shares the allocation; [`Heap::addr`] identifies it.
#[derive(PartialEq, Eq)]
pub struct Heap<T>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Address of the shared allocation.
    ///
    /// Stable for as long as any clone of this `Heap` is alive.
    #[inline]
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
