//! Busy flags that reset themselves
//!
//! A [`BusyGuard`] clears its flag when dropped, so the flag cannot stay set
//! after the guarded operation returns, fails, or is abandoned mid-await.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared boolean marking an operation in progress
///
/// Clones observe the same flag, so a UI task can watch it while the
/// dashboard runs the operation.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set the flag until the returned guard is dropped
    pub(crate) fn engage(&self) -> BusyGuard {
        self.0.store(true, Ordering::Release);
        BusyGuard(Arc::clone(&self.0))
    }
}

/// Clears the associated [`BusyFlag`] on drop
#[must_use = "the flag is cleared as soon as the guard is dropped"]
pub(crate) struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_sets_and_clears() {
        let flag = BusyFlag::new();
        assert!(!flag.is_set());
        {
            let _guard = flag.engage();
            assert!(flag.is_set());
        }
        assert!(!flag.is_set());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = BusyFlag::new();
        let observer = flag.clone();
        let guard = flag.engage();
        assert!(observer.is_set());
        drop(guard);
        assert!(!observer.is_set());
    }

    #[test]
    fn test_cleared_on_panic_unwind() {
        let flag = BusyFlag::new();
        let inner = flag.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = inner.engage();
            panic!("boom");
        });
        assert!(result.is_err());
        assert!(!flag.is_set());
    }
}
