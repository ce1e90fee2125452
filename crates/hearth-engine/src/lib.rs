//! Solver loop and parallel backends for the Hearth heat solver.
//!
//! [`HeatSolver`] drives rounds of the relaxation over a
//! [`Grid`](hearth_grid::Grid) through a [`Backend`]:
//!
//! ```text
//! HeatSolver::step()
//!   for phase in Phase::schedule(algorithm)
//!     Backend::run_phase()   partition rows, sweep, exchange, reduce
//!     Grid::swap()
//!   stable? ──yes──▶ Stabilized
//!           ──no───▶ Running (or Diverged at the round cap)
//! ```
//!
//! Four backends are available through [`BackendKind`]: sequential,
//! scoped threads with dynamic row claiming, message-passing ranks with a
//! static partition, and message-passing ranks that each sweep on a
//! thread pool. All of them produce bit-identical fields.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod comm;
pub mod config;
pub mod error;
pub mod metrics;
pub mod solver;
pub mod sync;

pub use backend::{Backend, MessagePassingBackend, SequentialBackend, ThreadPoolBackend};
pub use comm::{ChannelComm, Communicator, Message, Tag};
pub use config::{BackendKind, SolverConfig, MAX_WORKERS};
pub use error::{ConfigError, CoordinationError, SolveError};
pub use metrics::{PhaseReport, RoundMetrics};
pub use solver::{HeatSolver, SolverState};
pub use sync::StabilityFlag;
