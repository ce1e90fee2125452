//! Double-buffered heat field for the Hearth solver.
//!
//! [`Grid`] owns two same-shape buffers. One is "current" (read by the
//! stencil and by renderers), the other is written during a phase and
//! becomes current on [`Grid::swap`]. Which buffer is which is private to
//! the grid.
//!
//! ```text
//! Grid
//! ├── buffers[0] ─┐  one is current, the other is staging;
//! ├── buffers[1] ─┘  swap() flips the roles without copying
//! └── pins        border + source, identical in both buffers
//! ```
//!
//! Border and source cells are written once at construction (or on
//! [`Grid::repin`]) into both buffers and rejected by every other write
//! path, so they can never drift between buffers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod staging;
pub mod view;

pub use error::GridError;
pub use grid::Grid;
pub use staging::{RowWriter, Staging};
pub use view::FieldView;
