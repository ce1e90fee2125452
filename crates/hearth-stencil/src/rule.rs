//! The per-cell update rule.
//!
//! Jacobi: `new = mean(N, S, E, W)`, all read from the current buffer.
//!
//! Red-black SOR: `new = old + ω · (mean(N, S, E, W) − old)`. Every
//! orthogonal neighbour of a color-`k` cell has color `1 − k`, so once the
//! color-0 half-phase has been swapped in, a color-1 cell reading the
//! current buffer sees its neighbours' new values. That is the red-black
//! "mixed read"; no special indexing is needed here.

use hearth_core::{Algorithm, HeatParams, UpdateResult};
use hearth_grid::FieldView;

/// Recompute cell `(i, j)` from the current buffer.
///
/// Callers must skip border and source cells. No guard against NaN or
/// infinite inputs; SOR with `sor_constant` outside `(0, 2)` may diverge.
#[inline]
pub fn update_single(
    i: usize,
    j: usize,
    view: &FieldView<'_>,
    params: &HeatParams,
) -> UpdateResult {
    debug_assert!(
        !params.is_pinned(i, j),
        "stencil applied to pinned cell ({i}, {j})"
    );
    let old = view.get(i, j);
    let sum = view.get(i - 1, j) + view.get(i + 1, j) + view.get(i, j - 1) + view.get(i, j + 1);
    let mean = 0.25 * sum;
    let temp = match params.algorithm {
        Algorithm::Jacobi => mean,
        Algorithm::Sor => old + params.sor_constant * (mean - old),
    };
    UpdateResult {
        temp,
        stable: (temp - old).abs() < params.tolerance,
    }
}
