//! Test utilities for Hearth development.
//!
//! Provides parameter and backend fixtures ([`fixtures`]) and assertion
//! helpers for the invariants every backend must uphold: pinned cells
//! never move, row assignments cover the interior exactly once, and all
//! backends agree bit for bit.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::ops::Range;

use hearth_core::HeatParams;
use hearth_grid::FieldView;
use indexmap::IndexSet;

/// Panic unless every border cell holds `border_temp` and the source cell
/// holds `source_temp`.
pub fn assert_pins_intact(view: &FieldView<'_>, params: &HeatParams) {
    let n = view.room_size();
    assert_eq!(n, params.room_size, "view and params disagree on room size");
    for k in 0..n {
        for (i, j) in [(0, k), (n - 1, k), (k, 0), (k, n - 1)] {
            assert_eq!(
                view.get(i, j).to_bits(),
                params.border_temp.to_bits(),
                "border cell ({i}, {j}) moved to {}",
                view.get(i, j)
            );
        }
    }
    let (sx, sy) = (params.source_x, params.source_y);
    assert_eq!(
        view.get(sx, sy).to_bits(),
        params.source_temp.to_bits(),
        "source cell ({sx}, {sy}) moved to {}",
        view.get(sx, sy)
    );
}

/// Outcome of comparing handed-out rows against the rows that should have
/// been handed out.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Rows handed out more than once, in first-repeat order.
    pub duplicates: Vec<usize>,
    /// Expected rows never handed out.
    pub missing: Vec<usize>,
    /// Rows handed out that were not expected.
    pub unexpected: Vec<usize>,
}

impl Coverage {
    pub fn is_exact(&self) -> bool {
        self.duplicates.is_empty() && self.missing.is_empty() && self.unexpected.is_empty()
    }
}

/// Compare `claimed` rows against `expected`.
pub fn coverage(claimed: impl IntoIterator<Item = usize>, expected: Range<usize>) -> Coverage {
    let mut seen = IndexSet::new();
    let mut report = Coverage::default();
    for row in claimed {
        if !expected.contains(&row) {
            report.unexpected.push(row);
        } else if !seen.insert(row) {
            report.duplicates.push(row);
        }
    }
    report.missing = expected.filter(|row| !seen.contains(row)).collect();
    report
}

/// Panic unless `claimed` contains every row of `expected` exactly once
/// and nothing else.
pub fn assert_exact_cover(claimed: impl IntoIterator<Item = usize>, expected: Range<usize>) {
    let report = coverage(claimed, expected.clone());
    assert!(
        report.is_exact(),
        "rows {expected:?} not covered exactly once: {report:?}"
    );
}

/// Panic unless two fields are identical bit for bit, reporting the first
/// differing cell.
pub fn assert_fields_identical(left: &[f64], right: &[f64], room_size: usize) {
    assert_eq!(left.len(), right.len(), "field lengths differ");
    if let Some(k) = left
        .iter()
        .zip(right)
        .position(|(a, b)| a.to_bits() != b.to_bits())
    {
        panic!(
            "fields differ at ({}, {}): {} vs {}",
            k / room_size,
            k % room_size,
            left[k],
            right[k]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_reports_each_kind_of_defect() {
        let report = coverage([1, 2, 2, 9], 1..4);
        assert_eq!(report.duplicates, vec![2]);
        assert_eq!(report.missing, vec![3]);
        assert_eq!(report.unexpected, vec![9]);
        assert!(!report.is_exact());
    }

    #[test]
    fn exact_cover_in_any_order() {
        assert_exact_cover([3, 1, 2], 1..4);
    }

    #[test]
    #[should_panic(expected = "fields differ at (1, 0)")]
    fn identical_fields_reports_position() {
        assert_fields_identical(&[0.0, 0.0, 1.0, 0.0], &[0.0, 0.0, 2.0, 0.0], 2);
    }
}
