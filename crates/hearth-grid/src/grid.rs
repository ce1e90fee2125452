//! The double-buffered grid.

use std::ops::Range;

use hearth_core::HeatParams;

use crate::error::GridError;
use crate::staging::Staging;
use crate::view::FieldView;

/// Double-buffered `room_size × room_size` heat field.
///
/// # Buffer roles
///
/// ```text
/// buffers[current]     ←── read(), view(), snapshot(), restore()
/// buffers[1 - current] ←── write_other(), stage()
/// ```
///
/// [`swap()`](Grid::swap) exchanges the roles in O(1). The selector is
/// never exposed, so nothing outside this type can write the current
/// buffer during a phase.
#[derive(Clone, Debug)]
pub struct Grid {
    params: HeatParams,
    buffers: [Vec<f64>; 2],
    current: usize,
}

impl Grid {
    /// Build a grid with every free interior cell at `0.0`.
    pub fn new(params: &HeatParams) -> Result<Self, GridError> {
        Self::with_initial(params, 0.0)
    }

    /// Build a grid with every free interior cell at `initial`.
    ///
    /// Border and source cells are pinned in both buffers.
    pub fn with_initial(params: &HeatParams, initial: f64) -> Result<Self, GridError> {
        params.validate()?;
        let n = params.room_size;
        let mut buffer = vec![initial; n * n];
        pin(&mut buffer, params);
        Ok(Self {
            params: *params,
            buffers: [buffer.clone(), buffer],
            current: 0,
        })
    }

    /// Side length of the room.
    pub fn room_size(&self) -> usize {
        self.params.room_size
    }

    /// The parameters whose pins this grid carries.
    pub fn params(&self) -> &HeatParams {
        &self.params
    }

    /// Current-buffer value at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is `>= room_size`.
    pub fn read(&self, i: usize, j: usize) -> f64 {
        self.view().get(i, j)
    }

    /// Current-buffer value at `(i, j)`, or `None` outside the room.
    pub fn try_read(&self, i: usize, j: usize) -> Option<f64> {
        self.view().try_get(i, j)
    }

    /// Write `value` into the alternate buffer at `(i, j)`.
    ///
    /// Border and source cells are rejected with
    /// [`GridError::PinnedCell`].
    pub fn write_other(&mut self, i: usize, j: usize, value: f64) -> Result<(), GridError> {
        let n = self.room_size();
        if i >= n || j >= n {
            return Err(GridError::OutOfBounds { i, j, room_size: n });
        }
        if self.params.is_pinned(i, j) {
            return Err(GridError::PinnedCell { i, j });
        }
        self.buffers[1 - self.current][i * n + j] = value;
        Ok(())
    }

    /// Exchange the current and alternate buffers. No data is copied.
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }

    /// Read-only view of the current buffer.
    pub fn view(&self) -> FieldView<'_> {
        FieldView::new(&self.buffers[self.current], self.room_size())
    }

    /// Borrow the current buffer for reading and the alternate buffer for
    /// writing at the same time.
    pub fn stage(&mut self) -> (FieldView<'_>, Staging<'_>) {
        let n = self.params.room_size;
        let source = (self.params.source_x, self.params.source_y);
        let [a, b] = &mut self.buffers;
        let (current, other) = if self.current == 0 { (a, b) } else { (b, a) };
        (
            FieldView::new(current.as_slice(), n),
            Staging::new(other.as_mut_slice(), n, source),
        )
    }

    /// Rows `rows` of the alternate buffer, row-major.
    ///
    /// # Panics
    ///
    /// Panics if `rows.end > room_size`.
    pub fn other_rows(&self, rows: Range<usize>) -> &[f64] {
        let n = self.room_size();
        &self.buffers[1 - self.current][rows.start * n..rows.end * n]
    }

    /// Copy of the current buffer in row-major order.
    pub fn snapshot(&self) -> Vec<f64> {
        self.buffers[self.current].clone()
    }

    /// Overwrite the current buffer from a row-major snapshot.
    ///
    /// The snapshot must have `room_size²` cells and agree with this grid on
    /// every pinned cell; anything else was taken from a grid with
    /// different parameters.
    pub fn restore(&mut self, buffer: &[f64]) -> Result<(), GridError> {
        let n = self.room_size();
        if buffer.len() != n * n {
            return Err(GridError::SnapshotLength {
                expected: n * n,
                got: buffer.len(),
            });
        }
        let current = &mut self.buffers[self.current];
        if let Some(index) = first_pin_mismatch(&current[..], buffer, &self.params) {
            return Err(GridError::PinnedMismatch { index });
        }
        current.copy_from_slice(buffer);
        Ok(())
    }

    /// Re-pin border and source cells for parameters with the same room
    /// size, keeping every other cell's state.
    ///
    /// A moved source leaves its old cell at the old source temperature;
    /// from then on that cell is updated like any other interior cell.
    pub fn repin(&mut self, params: &HeatParams) -> Result<(), GridError> {
        params.validate()?;
        if params.room_size != self.room_size() {
            return Err(GridError::GeometryMismatch {
                expected: self.room_size(),
                got: params.room_size,
            });
        }
        self.params = *params;
        for buffer in &mut self.buffers {
            pin(buffer, params);
        }
        Ok(())
    }
}

fn pin(buffer: &mut [f64], params: &HeatParams) {
    let n = params.room_size;
    for (i, row) in buffer.chunks_mut(n).enumerate() {
        if i == 0 || i == n - 1 {
            row.fill(params.border_temp);
        } else {
            row[0] = params.border_temp;
            row[n - 1] = params.border_temp;
        }
    }
    buffer[params.source_x * n + params.source_y] = params.source_temp;
}

fn first_pin_mismatch(ours: &[f64], theirs: &[f64], params: &HeatParams) -> Option<usize> {
    let n = params.room_size;
    (0..n * n).find(|&idx| params.is_pinned(idx / n, idx % n) && ours[idx] != theirs[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::ParamsError;

    fn params(n: usize) -> HeatParams {
        HeatParams {
            border_temp: 10.0,
            source_temp: 90.0,
            ..HeatParams::with_room_size(n)
        }
    }

    #[test]
    fn pinned_cells_set_in_both_buffers() {
        let p = params(6);
        let mut grid = Grid::new(&p).unwrap();
        for _ in 0..2 {
            for i in 0..6 {
                for j in 0..6 {
                    let expected = if p.is_source(i, j) {
                        90.0
                    } else if !p.is_interior(i, j) {
                        10.0
                    } else {
                        0.0
                    };
                    assert_eq!(grid.read(i, j), expected, "cell ({i},{j})");
                }
            }
            grid.swap();
        }
    }

    #[test]
    fn invalid_params_rejected_before_allocation() {
        let p = HeatParams {
            source_x: 0,
            ..params(6)
        };
        match Grid::new(&p) {
            Err(GridError::Params(ParamsError::SourceNotInterior { .. })) => {}
            other => panic!("expected SourceNotInterior, got {other:?}"),
        }
    }

    #[test]
    fn write_other_is_invisible_until_swap() {
        let mut grid = Grid::new(&params(5)).unwrap();
        grid.write_other(1, 1, 42.0).unwrap();
        assert_eq!(grid.read(1, 1), 0.0);
        grid.swap();
        assert_eq!(grid.read(1, 1), 42.0);
        grid.swap();
        assert_eq!(grid.read(1, 1), 0.0);
    }

    #[test]
    fn write_other_rejects_pinned_and_out_of_range() {
        let p = params(5);
        let mut grid = Grid::new(&p).unwrap();
        assert_eq!(
            grid.write_other(0, 2, 1.0),
            Err(GridError::PinnedCell { i: 0, j: 2 })
        );
        assert_eq!(
            grid.write_other(p.source_x, p.source_y, 1.0),
            Err(GridError::PinnedCell { i: 2, j: 2 })
        );
        assert_eq!(
            grid.write_other(5, 1, 1.0),
            Err(GridError::OutOfBounds {
                i: 5,
                j: 1,
                room_size: 5
            })
        );
    }

    #[test]
    fn with_initial_fills_free_interior() {
        let p = params(4);
        let grid = Grid::with_initial(&p, 3.5).unwrap();
        assert_eq!(grid.read(1, 1), 3.5);
        assert_eq!(grid.read(0, 0), 10.0);
        assert_eq!(grid.read(2, 2), 90.0);
    }

    #[test]
    fn stage_reads_current_and_writes_other() {
        let mut grid = Grid::new(&params(5)).unwrap();
        {
            let (view, staging) = grid.stage();
            assert_eq!(view.get(1, 1), 0.0);
            let mut rows = staging.into_rows();
            rows[0].set(1, 7.0).unwrap();
        }
        assert_eq!(grid.read(1, 1), 0.0);
        assert_eq!(grid.other_rows(1..2)[1], 7.0);
        grid.swap();
        assert_eq!(grid.read(1, 1), 7.0);
    }

    #[test]
    fn restore_checks_length_and_pins() {
        let p = params(4);
        let mut grid = Grid::new(&p).unwrap();
        assert_eq!(
            grid.restore(&[0.0; 3]),
            Err(GridError::SnapshotLength {
                expected: 16,
                got: 3
            })
        );

        let foreign = Grid::new(&HeatParams {
            border_temp: 11.0,
            ..p
        })
        .unwrap()
        .snapshot();
        assert_eq!(
            grid.restore(&foreign),
            Err(GridError::PinnedMismatch { index: 0 })
        );
    }

    #[test]
    fn restore_overwrites_current_buffer() {
        let p = params(4);
        let mut source = Grid::new(&p).unwrap();
        source.write_other(1, 1, 5.0).unwrap();
        source.swap();

        let mut target = Grid::new(&p).unwrap();
        target.restore(&source.snapshot()).unwrap();
        assert_eq!(target.read(1, 1), 5.0);
        assert_eq!(target.snapshot(), source.snapshot());
    }

    #[test]
    fn repin_moves_source_and_keeps_state() {
        let p = params(6);
        let mut grid = Grid::new(&p).unwrap();
        grid.write_other(1, 1, 4.0).unwrap();
        grid.swap();

        let moved = HeatParams {
            source_x: 2,
            source_y: 2,
            border_temp: 0.0,
            ..p
        };
        grid.repin(&moved).unwrap();
        assert_eq!(grid.read(1, 1), 4.0);
        assert_eq!(grid.read(2, 2), 90.0);
        assert_eq!(grid.read(0, 3), 0.0);
        // Old source cell is now free.
        assert_eq!(grid.read(3, 3), 90.0);
        assert!(grid.write_other(3, 3, 1.0).is_ok());
        assert!(grid.write_other(2, 2, 1.0).is_err());
    }

    #[test]
    fn repin_rejects_new_geometry() {
        let mut grid = Grid::new(&params(6)).unwrap();
        assert_eq!(
            grid.repin(&params(8)),
            Err(GridError::GeometryMismatch {
                expected: 6,
                got: 8
            })
        );
    }
}
