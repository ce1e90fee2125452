//! Write access to the staging (alternate) buffer during a phase.
//!
//! [`Staging`] is produced by [`Grid::stage`](crate::Grid::stage) together
//! with a [`FieldView`](crate::FieldView) of the current buffer. It hands
//! out one [`RowWriter`] per interior row. Border rows are never handed
//! out, and each writer refuses the border columns and the source cell,
//! so pinned cells cannot be touched through this path.
//!
//! Because every `RowWriter` owns a disjoint `&mut [f64]`, rows can be
//! moved to different threads without locks.

use crate::error::GridError;

/// Mutable access to the interior rows of the staging buffer.
#[must_use]
pub struct Staging<'a> {
    data: &'a mut [f64],
    room_size: usize,
    source: (usize, usize),
}

impl<'a> Staging<'a> {
    pub(crate) fn new(data: &'a mut [f64], room_size: usize, source: (usize, usize)) -> Self {
        Self {
            data,
            room_size,
            source,
        }
    }

    /// Side length of the room.
    pub fn room_size(&self) -> usize {
        self.room_size
    }

    /// Split into one writer per interior row, ordered by row index.
    ///
    /// Element `k` writes row `k + 1`.
    pub fn into_rows(self) -> Vec<RowWriter<'a>> {
        let n = self.room_size;
        let source = self.source;
        self.data
            .chunks_mut(n)
            .enumerate()
            .skip(1)
            .take(n.saturating_sub(2))
            .map(|(row, cells)| RowWriter {
                row,
                cells,
                source_col: (row == source.0).then_some(source.1),
            })
            .collect()
    }
}

/// Exclusive write access to one interior row of the staging buffer.
#[derive(Debug)]
pub struct RowWriter<'a> {
    row: usize,
    cells: &'a mut [f64],
    source_col: Option<usize>,
}

impl RowWriter<'_> {
    /// Row index within the room.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Number of cells in the row (the room size).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a room has at least three columns.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether column `j` of this row is pinned.
    #[inline]
    pub fn is_pinned(&self, j: usize) -> bool {
        j == 0 || j + 1 >= self.cells.len() || self.source_col == Some(j)
    }

    /// Write `value` into column `j`.
    pub fn set(&mut self, j: usize, value: f64) -> Result<(), GridError> {
        if j >= self.cells.len() {
            return Err(GridError::OutOfBounds {
                i: self.row,
                j,
                room_size: self.cells.len(),
            });
        }
        if self.is_pinned(j) {
            return Err(GridError::PinnedCell { i: self.row, j });
        }
        self.cells[j] = value;
        Ok(())
    }

    /// Copy a full row, skipping pinned columns.
    ///
    /// Used to reassemble rows computed by workers that hold their own
    /// copy of the grid; their pinned cells are identical to ours.
    pub fn copy_from(&mut self, values: &[f64]) -> Result<(), GridError> {
        if values.len() != self.cells.len() {
            return Err(GridError::RowLength {
                expected: self.cells.len(),
                got: values.len(),
            });
        }
        let last = self.cells.len() - 1;
        for (j, &v) in values.iter().enumerate().take(last).skip(1) {
            if self.source_col != Some(j) {
                self.cells[j] = v;
            }
        }
        Ok(())
    }
}
