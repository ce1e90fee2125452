//! Shared-memory stability reduction.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global stability flag AND-combined across thread workers.
///
/// Starts `true`. Each worker folds in its local AND once per phase with
/// release ordering; the coordinator reads the result once with acquire
/// ordering after joining the workers. A single `false` from any worker
/// makes the result `false`.
#[derive(Debug)]
pub struct StabilityFlag {
    stable: AtomicBool,
}

impl StabilityFlag {
    /// A fresh flag for one phase.
    pub fn new() -> Self {
        Self {
            stable: AtomicBool::new(true),
        }
    }

    /// Combine one worker's local result.
    pub fn fold(&self, local: bool) {
        self.stable.fetch_and(local, Ordering::Release);
    }

    /// The combined result.
    pub fn get(&self) -> bool {
        self.stable.load(Ordering::Acquire)
    }
}

impl Default for StabilityFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn empty_fold_is_stable() {
        assert!(StabilityFlag::new().get());
    }

    #[test]
    fn one_false_wins() {
        let flag = StabilityFlag::new();
        flag.fold(true);
        flag.fold(false);
        flag.fold(true);
        assert!(!flag.get());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn threaded_fold_is_logical_and(
                locals in proptest::collection::vec(any::<bool>(), 1..16),
            ) {
                let flag = StabilityFlag::new();
                thread::scope(|s| {
                    for &local in &locals {
                        let flag = &flag;
                        s.spawn(move || flag.fold(local));
                    }
                });
                prop_assert_eq!(flag.get(), locals.iter().all(|&b| b));
            }
        }
    }
}
