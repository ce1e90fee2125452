//! Grid-specific error types.

use std::error::Error;
use std::fmt;

use hearth_core::ParamsError;

/// Errors that can occur during grid operations.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// The parameters the grid was asked to represent are invalid.
    Params(ParamsError),
    /// A cell index is outside the room.
    OutOfBounds {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Side length of the room.
        room_size: usize,
    },
    /// Attempted to write a border or source cell.
    PinnedCell {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// A snapshot passed to [`Grid::restore`](crate::Grid::restore) has the
    /// wrong number of cells.
    SnapshotLength {
        /// `room_size * room_size`.
        expected: usize,
        /// Length of the offered buffer.
        got: usize,
    },
    /// A snapshot disagrees with this grid on a pinned cell, so it was
    /// taken from a grid with different parameters.
    PinnedMismatch {
        /// Row-major index of the first disagreeing cell.
        index: usize,
    },
    /// A row copied into the staging buffer has the wrong length.
    RowLength {
        /// `room_size`.
        expected: usize,
        /// Length of the offered row.
        got: usize,
    },
    /// [`Grid::repin`](crate::Grid::repin) was given a different room size.
    GeometryMismatch {
        /// This grid's room size.
        expected: usize,
        /// The room size in the offered parameters.
        got: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Params(e) => write!(f, "invalid parameters: {e}"),
            Self::OutOfBounds { i, j, room_size } => {
                write!(f, "cell ({i}, {j}) outside {room_size}x{room_size} room")
            }
            Self::PinnedCell { i, j } => {
                write!(f, "cell ({i}, {j}) is pinned and cannot be written")
            }
            Self::SnapshotLength { expected, got } => {
                write!(f, "snapshot has {got} cells, expected {expected}")
            }
            Self::PinnedMismatch { index } => {
                write!(f, "snapshot disagrees with pinned cell at index {index}")
            }
            Self::RowLength { expected, got } => {
                write!(f, "row has {got} cells, expected {expected}")
            }
            Self::GeometryMismatch { expected, got } => {
                write!(f, "room size {got} does not match grid room size {expected}")
            }
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Params(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamsError> for GridError {
    fn from(e: ParamsError) -> Self {
        Self::Params(e)
    }
}
