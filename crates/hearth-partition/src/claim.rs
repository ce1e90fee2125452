//! Dynamic claim-based row distribution for thread workers.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::range::RowRange;

/// Shared countdown of rows still to be computed this phase.
///
/// Any worker that finishes a row calls [`claim()`](RowClaim::claim) for
/// the next one. Rows are handed out from the top of the range down. The
/// counter is decremented with a compare-and-swap that refuses to go below
/// zero, so every row is returned to exactly one caller and every caller
/// sees `None` once the range is exhausted. There is no "done" broadcast:
/// each worker stops on its own when its claim fails.
#[derive(Debug)]
pub struct RowClaim {
    first: usize,
    remaining: AtomicUsize,
}

// Compile-time assertion: RowClaim must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<RowClaim>();
};

impl RowClaim {
    /// Start a countdown over `rows`.
    pub fn new(rows: RowRange) -> Self {
        Self {
            first: rows.start,
            remaining: AtomicUsize::new(rows.len()),
        }
    }

    /// Take the next unclaimed row, or `None` when none are left.
    pub fn claim(&self) -> Option<usize> {
        self.remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| {
                left.checked_sub(1)
            })
            .ok()
            .map(|left| self.first + left - 1)
    }

    /// Rows not yet claimed.
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }
}
