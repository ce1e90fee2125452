//! Per-round performance metrics.

/// Timing data collected during a single round.
///
/// All durations are in microseconds. The solver populates these fields
/// after each [`step()`](crate::HeatSolver::step); consumers read them
/// from the most recent round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundMetrics {
    /// 1-based index of the round within the current run.
    pub round: u64,
    /// Phases executed in the round (1 for Jacobi, 2 for SOR).
    pub phases: u32,
    /// Time spent computing cell updates, summed over phases.
    pub compute_us: u64,
    /// Time spent broadcasting, gathering, and reducing, summed over phases.
    /// Zero for shared-memory backends.
    pub exchange_us: u64,
    /// Wall-clock time for the whole round, including buffer swaps.
    pub total_us: u64,
    /// Whether every updated cell moved by less than the tolerance.
    pub stable: bool,
}

/// Outcome of one phase as reported by a backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseReport {
    /// Global AND of every worker's stability flag.
    pub stable: bool,
    /// Time spent computing, in microseconds.
    pub compute_us: u64,
    /// Time spent exchanging data, in microseconds.
    pub exchange_us: u64,
}

pub(crate) fn micros(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
