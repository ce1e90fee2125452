//! Partitioning errors.

use std::error::Error;
use std::fmt;

/// Errors from building a partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartitionError {
    /// A partition needs at least one worker.
    ZeroWorkers,
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWorkers => write!(f, "cannot partition rows among zero workers"),
        }
    }
}

impl Error for PartitionError {}
