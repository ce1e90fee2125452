//! Read-only view of the current buffer.

/// Borrowed, read-only view of a grid's current buffer.
///
/// This is what the stencil reads from during a phase and what renderers
/// read between rounds. Cells are stored row-major.
#[derive(Clone, Copy, Debug)]
pub struct FieldView<'a> {
    data: &'a [f64],
    room_size: usize,
}

impl<'a> FieldView<'a> {
    pub(crate) fn new(data: &'a [f64], room_size: usize) -> Self {
        debug_assert_eq!(data.len(), room_size * room_size);
        Self { data, room_size }
    }

    /// Side length of the room.
    pub fn room_size(&self) -> usize {
        self.room_size
    }

    /// Value at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is `>= room_size`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            j < self.room_size,
            "column {j} out of range for room size {}",
            self.room_size
        );
        self.data[i * self.room_size + j]
    }

    /// Value at `(i, j)`, or `None` outside the room.
    pub fn try_get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.room_size && j < self.room_size {
            Some(self.data[i * self.room_size + j])
        } else {
            None
        }
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &'a [f64] {
        let start = i * self.room_size;
        &self.data[start..start + self.room_size]
    }

    /// The whole buffer in row-major order.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Iterator over rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'a, f64> {
        self.data.chunks(self.room_size)
    }
}
