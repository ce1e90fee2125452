//! Row sweeps: apply the update rule across staging rows for one phase.

use hearth_core::{HeatParams, Phase};
use hearth_grid::{FieldView, GridError, RowWriter};

use crate::rule::update_single;

/// Update every free cell of `row` for `phase`.
///
/// Cells the phase recomputes get the rule's value; the others (the
/// opposite color during an SOR half-phase) are copied from the current
/// buffer, so the staging row is complete once this returns. Pinned cells
/// are skipped.
///
/// Returns the AND of the per-cell stability flags of recomputed cells.
pub fn sweep_row(
    row: &mut RowWriter<'_>,
    view: &FieldView<'_>,
    params: &HeatParams,
    phase: Phase,
) -> Result<bool, GridError> {
    let i = row.row();
    let mut stable = true;
    for j in 1..row.len() - 1 {
        if row.is_pinned(j) {
            continue;
        }
        if phase.updates(i, j) {
            let result = update_single(i, j, view, params);
            stable &= result.stable;
            row.set(j, result.temp)?;
        } else {
            row.set(j, view.get(i, j))?;
        }
    }
    Ok(stable)
}

/// [`sweep_row`] over a set of rows, AND-reducing their stability.
///
/// Every row is swept even after an unstable one is seen.
pub fn sweep_rows<'r, 'a: 'r, I>(
    rows: I,
    view: &FieldView<'_>,
    params: &HeatParams,
    phase: Phase,
) -> Result<bool, GridError>
where
    I: IntoIterator<Item = &'r mut RowWriter<'a>>,
{
    let mut stable = true;
    for row in rows {
        stable &= sweep_row(row, view, params, phase)?;
    }
    Ok(stable)
}
