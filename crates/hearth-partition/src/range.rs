//! Half-open row ranges.

use std::fmt;
use std::ops::Range;

/// Contiguous half-open range of row indices `[start, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RowRange {
    /// First row in the range.
    pub start: usize,
    /// One past the last row.
    pub end: usize,
}

impl RowRange {
    /// Create a range. `end < start` is normalized to an empty range.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// The interior rows of a `room_size` room: `1..room_size - 1`.
    pub fn interior(room_size: usize) -> Self {
        Self::new(1, room_size.saturating_sub(1))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range holds no rows.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `row` lies in the range.
    pub fn contains(&self, row: usize) -> bool {
        (self.start..self.end).contains(&row)
    }

    /// The rows as a std range.
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<RowRange> for Range<usize> {
    fn from(r: RowRange) -> Self {
        r.rows()
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rows {}..{}", self.start, self.end)
    }
}
