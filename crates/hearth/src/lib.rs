//! Hearth: an iterative solver for steady-state 2D heat distribution.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Hearth sub-crates. For most users, adding `hearth` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use hearth::prelude::*;
//!
//! let params = HeatParams {
//!     border_temp: 0.0,
//!     source_temp: 100.0,
//!     tolerance: 0.05,
//!     ..HeatParams::with_room_size(12)
//! };
//! let config = SolverConfig::with_backend(BackendKind::Threads { workers: Some(2) });
//! let mut solver = HeatSolver::new(params, config).unwrap();
//! let rounds = solver.run_to_convergence().unwrap();
//! assert!(solver.is_stabilized());
//! assert!(rounds > 0);
//! assert_eq!(solver.view().get(6, 6), 100.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `hearth-core` | Parameters, algorithms, phases, color mapping |
//! | [`grid`] | `hearth-grid` | Double-buffered field, views, staging writers |
//! | [`stencil`] | `hearth-stencil` | Jacobi and red-black SOR update rules |
//! | [`partition`] | `hearth-partition` | Static blocks and dynamic row claims |
//! | [`engine`] | `hearth-engine` | Solver loop, backends, communicator |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Parameters, update rules, and phases (`hearth-core`).
pub use hearth_core as types;

/// Double-buffered heat field (`hearth-grid`).
///
/// [`grid::Grid`] owns the buffers; [`grid::FieldView`] is the read-only
/// surface handed to renderers.
pub use hearth_grid as grid;

/// Five-point update rules (`hearth-stencil`).
pub use hearth_stencil as stencil;

/// Row partitioning (`hearth-partition`).
pub use hearth_partition as partition;

/// Solver loop and execution backends (`hearth-engine`).
///
/// [`engine::HeatSolver`] drives rounds; [`engine::BackendKind`] selects
/// how they are distributed.
pub use hearth_engine as engine;

/// Common imports for typical Hearth usage.
///
/// ```rust
/// use hearth::prelude::*;
/// ```
pub mod prelude {
    // Parameters
    pub use hearth_core::{temp_to_rgb, Algorithm, HeatParams, Phase};

    // Field access
    pub use hearth_grid::FieldView;

    // Solver
    pub use hearth_engine::{
        BackendKind, HeatSolver, RoundMetrics, SolverConfig, SolverState,
    };

    // Errors
    pub use hearth_core::ParamsError;
    pub use hearth_engine::{ConfigError, CoordinationError, SolveError};
    pub use hearth_grid::GridError;
}
