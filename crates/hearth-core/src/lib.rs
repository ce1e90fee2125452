//! Core types for the Hearth heat-distribution solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! immutable run parameters, the update-rule selector, per-cell update
//! results, and the parameter validation errors shared by every other
//! crate in the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod color;
pub mod error;
pub mod params;
pub mod phase;

pub use color::temp_to_rgb;
pub use error::ParamsError;
pub use params::HeatParams;
pub use phase::{Algorithm, Phase, UpdateResult};
