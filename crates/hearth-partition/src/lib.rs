//! Row partitioning for the Hearth solver.
//!
//! Two policies split the interior rows `1..room_size - 1` among workers:
//!
//! - [`StaticPartition`]: contiguous blocks fixed up front, one per
//!   worker. Used by the message-passing backends, where communication
//!   dominates and the assignment must be known to every rank.
//! - [`RowClaim`]: a shared atomic countdown that threads draw rows from
//!   until it is exhausted. Used by the thread backend to absorb uneven
//!   row costs.
//!
//! Both guarantee that no row is handed to two workers in the same phase.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod claim;
pub mod error;
pub mod range;
pub mod fixed;

pub use claim::RowClaim;
pub use error::PartitionError;
pub use fixed::StaticPartition;
pub use range::RowRange;
