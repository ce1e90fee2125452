//! Five-point stencil update rules for the Hearth solver.
//!
//! [`update_single`] is the pure per-cell rule. [`sweep_row`] and
//! [`sweep_rows`] apply it across rows of the staging buffer for one
//! [`Phase`](hearth_core::Phase), which is the unit every parallel
//! backend distributes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod rule;
pub mod sweep;

pub use rule::update_single;
pub use sweep::{sweep_row, sweep_rows};
