//! Stack growth for deeply nested comparisons.
//!
//! Values nested a few thousand levels deep would overflow the default thread
//! stack during recursive comparison or rendering. Recursive entry points wrap
//! their bodies in [`ensure_sufficient_stack`], which grows the stack on
//! native targets and is a passthrough on WASM.

/// Remaining stack below which a new segment is allocated (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_closure_result() {
        assert_eq!(ensure_sufficient_stack(|| 7 * 6), 42);
    }

    #[test]
    fn test_deep_recursion_does_not_overflow() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        assert_eq!(depth(100_000), 100_000);
    }
}
