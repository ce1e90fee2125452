//! Solver configuration: which backend runs the phases, and the round cap.

use crate::error::ConfigError;

/// Upper bound applied to every resolved worker, rank, or thread count.
pub const MAX_WORKERS: usize = 64;

// ── BackendKind ────────────────────────────────────────────────────

/// Execution backend for the relaxation phases.
///
/// Every backend produces bit-identical fields; they differ only in how
/// rows are distributed and how results are exchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// One thread computes every row.
    #[default]
    Sequential,
    /// Scoped threads sharing the grid, claiming rows dynamically.
    Threads {
        /// Thread count. `None` = `available_parallelism`.
        workers: Option<usize>,
    },
    /// Ranks sharing no memory, exchanging the field over channels with a
    /// static row partition.
    MessagePassing {
        /// Number of ranks, including the coordinating rank 0.
        ranks: usize,
    },
    /// Message passing where each rank sweeps its rows on its own thread
    /// pool.
    Hybrid {
        /// Number of ranks, including the coordinating rank 0.
        ranks: usize,
        /// Pool threads per rank.
        threads_per_rank: usize,
    },
}

impl BackendKind {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Threads { .. } => "threads",
            Self::MessagePassing { .. } => "message-passing",
            Self::Hybrid { .. } => "hybrid",
        }
    }

    /// Reject zero counts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Sequential => Ok(()),
            Self::Threads { workers } => nonzero(workers.unwrap_or(1), "workers"),
            Self::MessagePassing { ranks } => nonzero(ranks, "ranks"),
            Self::Hybrid {
                ranks,
                threads_per_rank,
            } => {
                nonzero(ranks, "ranks")?;
                nonzero(threads_per_rank, "threads_per_rank")
            }
        }
    }

    /// Total number of concurrent workers this backend will run.
    ///
    /// Auto-detected counts use `available_parallelism`. Every count is
    /// clamped to `[1, MAX_WORKERS]`; for [`Hybrid`](Self::Hybrid) the
    /// clamp applies to ranks and threads separately.
    pub fn resolved_workers(&self) -> usize {
        match *self {
            Self::Sequential => 1,
            Self::Threads { workers } => resolve(workers),
            Self::MessagePassing { ranks } => resolve(Some(ranks)),
            Self::Hybrid {
                ranks,
                threads_per_rank,
            } => resolve(Some(ranks)) * resolve(Some(threads_per_rank)),
        }
    }
}

/// Clamp an explicit count, or detect one when `None`.
pub(crate) fn resolve(count: Option<usize>) -> usize {
    match count {
        Some(n) => n.clamp(1, MAX_WORKERS),
        None => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
            .clamp(1, MAX_WORKERS),
    }
}

fn nonzero(n: usize, what: &'static str) -> Result<(), ConfigError> {
    if n == 0 {
        Err(ConfigError::ZeroWorkers { what })
    } else {
        Ok(())
    }
}

// ── SolverConfig ───────────────────────────────────────────────────

/// Configuration for [`HeatSolver`](crate::HeatSolver).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Execution backend. Default: [`BackendKind::Sequential`].
    pub backend: BackendKind,
    /// Give up with [`SolveError::DidNotConverge`](crate::SolveError::DidNotConverge)
    /// after this many rounds without stabilizing. `None` = run until
    /// stable. Default: `None`.
    pub max_rounds: Option<u64>,
}

impl SolverConfig {
    /// Configuration running `backend` with no round cap.
    pub fn with_backend(backend: BackendKind) -> Self {
        Self {
            backend,
            max_rounds: None,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.validate()?;
        if self.max_rounds == Some(0) {
            return Err(ConfigError::ZeroRoundCap);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sequential_uncapped() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.backend, BackendKind::Sequential);
        assert_eq!(cfg.max_rounds, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_round_cap_rejected() {
        let cfg = SolverConfig {
            max_rounds: Some(0),
            ..SolverConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroRoundCap));
    }

    #[test]
    fn zero_counts_rejected() {
        for kind in [
            BackendKind::Threads { workers: Some(0) },
            BackendKind::MessagePassing { ranks: 0 },
            BackendKind::Hybrid {
                ranks: 0,
                threads_per_rank: 2,
            },
            BackendKind::Hybrid {
                ranks: 2,
                threads_per_rank: 0,
            },
        ] {
            match SolverConfig::with_backend(kind).validate() {
                Err(ConfigError::ZeroWorkers { .. }) => {}
                other => panic!("expected ZeroWorkers for {kind:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn resolved_workers_clamps_large() {
        let kind = BackendKind::Threads { workers: Some(200) };
        assert_eq!(kind.resolved_workers(), MAX_WORKERS);
        let kind = BackendKind::Hybrid {
            ranks: 3,
            threads_per_rank: 2,
        };
        assert_eq!(kind.resolved_workers(), 6);
    }

    #[test]
    fn resolved_workers_auto() {
        let count = BackendKind::Threads { workers: None }.resolved_workers();
        assert!((1..=MAX_WORKERS).contains(&count));
    }
}
