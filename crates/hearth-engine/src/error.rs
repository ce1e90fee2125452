//! Engine-level error types.
//!
//! [`ConfigError`] is raised before any round runs. [`CoordinationError`]
//! and [`SolveError`] are raised while solving; coordination failures are
//! fatal and never retried.

use std::error::Error;
use std::fmt;

use hearth_core::ParamsError;
use hearth_grid::GridError;
use hearth_partition::PartitionError;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building or reconfiguring a solver.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The heat parameters are invalid.
    Params(ParamsError),
    /// A grid could not be built for otherwise valid parameters.
    Grid(GridError),
    /// A backend was configured with zero workers, ranks, or threads.
    ZeroWorkers {
        /// Which count was zero.
        what: &'static str,
    },
    /// `max_rounds` was `Some(0)`.
    ZeroRoundCap,
    /// A worker thread or thread pool could not be created.
    ThreadSpawnFailed {
        /// Description of what failed to spawn.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Params(e) => write!(f, "invalid parameters: {e}"),
            Self::Grid(e) => write!(f, "grid construction failed: {e}"),
            Self::ZeroWorkers { what } => write!(f, "{what} must be at least 1"),
            Self::ZeroRoundCap => write!(f, "max_rounds must be at least 1 when set"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn worker thread: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Params(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamsError> for ConfigError {
    fn from(e: ParamsError) -> Self {
        Self::Params(e)
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        match e {
            GridError::Params(p) => Self::Params(p),
            other => Self::Grid(other),
        }
    }
}

impl From<PartitionError> for ConfigError {
    fn from(e: PartitionError) -> Self {
        match e {
            PartitionError::ZeroWorkers => Self::ZeroWorkers { what: "workers" },
        }
    }
}

// ── CoordinationError ──────────────────────────────────────────────

/// Failures of the worker exchange protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoordinationError {
    /// A peer's channel disconnected: the peer exited or panicked.
    PeerLost {
        /// Rank of the lost peer.
        rank: usize,
    },
    /// A message did not match what the protocol expected at this point.
    MalformedMessage {
        /// Rank that sent the message.
        from: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// A worker thread panicked.
    WorkerPanicked {
        /// Index or rank of the worker.
        worker: usize,
    },
    /// A message was addressed to a rank with no channel (itself or out
    /// of range).
    UnknownPeer {
        /// The offending rank.
        rank: usize,
    },
    /// A worker thread could not be spawned during a phase.
    SpawnFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for CoordinationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerLost { rank } => write!(f, "lost contact with rank {rank}"),
            Self::MalformedMessage { from, reason } => {
                write!(f, "malformed message from rank {from}: {reason}")
            }
            Self::WorkerPanicked { worker } => write!(f, "worker {worker} panicked"),
            Self::UnknownPeer { rank } => write!(f, "no channel to rank {rank}"),
            Self::SpawnFailed { reason } => write!(f, "failed to spawn worker: {reason}"),
        }
    }
}

impl Error for CoordinationError {}

// ── SolveError ─────────────────────────────────────────────────────

/// Errors returned by [`HeatSolver`](crate::HeatSolver) while stepping.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    /// Workers could not complete a phase.
    Coordination(CoordinationError),
    /// A grid operation failed during a phase.
    Grid(GridError),
    /// The round cap was reached before the field stabilized.
    DidNotConverge {
        /// Rounds completed in this run.
        rounds: u64,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordination(e) => write!(f, "coordination failed: {e}"),
            Self::Grid(e) => write!(f, "grid error: {e}"),
            Self::DidNotConverge { rounds } => {
                write!(f, "field did not stabilize within {rounds} rounds")
            }
        }
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Coordination(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::DidNotConverge { .. } => None,
        }
    }
}

impl From<CoordinationError> for SolveError {
    fn from(e: CoordinationError) -> Self {
        Self::Coordination(e)
    }
}

impl From<GridError> for SolveError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_params_error_unwraps_to_params() {
        let inner = ParamsError::RoomTooSmall { room_size: 2 };
        let e = ConfigError::from(GridError::Params(inner.clone()));
        assert_eq!(e, ConfigError::Params(inner));
    }

    #[test]
    fn source_chains_through_wrappers() {
        let e = SolveError::from(CoordinationError::PeerLost { rank: 3 });
        let src = e.source().map(|s| s.to_string());
        assert_eq!(src.as_deref(), Some("lost contact with rank 3"));
        assert!(SolveError::DidNotConverge { rounds: 9 }.source().is_none());
    }

    #[test]
    fn display_mentions_counts() {
        let e = SolveError::DidNotConverge { rounds: 42 };
        assert!(e.to_string().contains("42"));
        let e = ConfigError::ZeroWorkers { what: "ranks" };
        assert_eq!(e.to_string(), "ranks must be at least 1");
    }
}
