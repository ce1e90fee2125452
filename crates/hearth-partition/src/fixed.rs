//! Static contiguous partitioning.

use smallvec::SmallVec;

use crate::error::PartitionError;
use crate::range::RowRange;

/// Contiguous row blocks fixed for the lifetime of a run, one per worker.
///
/// The interior rows are divided as evenly as possible. When they do not
/// divide evenly, the lowest-indexed workers take one extra row each, so
/// block sizes differ by at most one and the layout depends only on
/// `(room_size, workers)`. With more workers than rows, the highest ranks
/// receive empty blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticPartition {
    ranges: SmallVec<[RowRange; 8]>,
}

impl StaticPartition {
    /// Partition the interior rows of a `room_size` room among `workers`.
    pub fn new(room_size: usize, workers: usize) -> Result<Self, PartitionError> {
        Self::over(RowRange::interior(room_size), workers)
    }

    /// Partition an arbitrary row range among `workers`.
    pub fn over(rows: RowRange, workers: usize) -> Result<Self, PartitionError> {
        if workers == 0 {
            return Err(PartitionError::ZeroWorkers);
        }
        let base = rows.len() / workers;
        let extra = rows.len() % workers;
        let mut ranges = SmallVec::with_capacity(workers);
        let mut start = rows.start;
        for rank in 0..workers {
            let len = base + usize::from(rank < extra);
            ranges.push(RowRange::new(start, start + len));
            start += len;
        }
        debug_assert_eq!(start, rows.end);
        Ok(Self { ranges })
    }

    /// Number of workers.
    pub fn workers(&self) -> usize {
        self.ranges.len()
    }

    /// Rows owned by `rank`, or `None` if `rank >= workers`.
    pub fn range(&self, rank: usize) -> Option<RowRange> {
        self.ranges.get(rank).copied()
    }

    /// Every worker's rows, indexed by rank.
    pub fn ranges(&self) -> &[RowRange] {
        &self.ranges
    }

    /// The worker that owns `row`, if any.
    pub fn owner_of(&self, row: usize) -> Option<usize> {
        self.ranges.iter().position(|r| r.contains(row))
    }
}
