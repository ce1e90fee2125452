//! The solver loop: rounds, convergence, and parameter changes.

use std::fmt;
use std::time::{Duration, Instant};

use hearth_core::{HeatParams, Phase};
use hearth_grid::{FieldView, Grid};

use crate::backend::{self, Backend};
use crate::config::{BackendKind, SolverConfig};
use crate::error::{ConfigError, SolveError};
use crate::metrics::{micros, RoundMetrics};

// ── SolverState ────────────────────────────────────────────────────

/// Lifecycle state of a [`HeatSolver`].
///
/// ```text
///            step()              stable round
///   Idle ──────────▶ Running ─────────────────▶ Stabilized
///                      │  ▲                          │
///          round cap   │  └──── set_params(changed) ─┘
///                      ▼
///                   Diverged ── set_params(changed) ──▶ Running
///
///   any state ── backend failure ──▶ Failed
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolverState {
    /// Built; no round has run yet.
    Idle,
    /// Rounds are being computed.
    Running,
    /// The last round left every cell within tolerance.
    Stabilized,
    /// The round cap was reached first.
    Diverged,
    /// A backend failed. The solver cannot continue.
    Failed,
}

impl fmt::Display for SolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stabilized => "stabilized",
            Self::Diverged => "diverged",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ── HeatSolver ─────────────────────────────────────────────────────

/// Iterative heat-distribution solver.
///
/// Owns the grid and the backend. Each [`step()`](Self::step) runs one
/// round: every phase of the configured algorithm, each followed by a
/// buffer swap. The field is stable when a whole round moves no cell by
/// `tolerance` or more.
pub struct HeatSolver {
    params: HeatParams,
    config: SolverConfig,
    grid: Grid,
    backend: Box<dyn Backend>,
    state: SolverState,
    rounds: u64,
    started: Option<Instant>,
    elapsed: Duration,
    last_metrics: RoundMetrics,
    fault: Option<SolveError>,
}

impl fmt::Debug for HeatSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeatSolver")
            .field("params", &self.params)
            .field("backend", &self.backend.kind())
            .field("state", &self.state)
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

impl HeatSolver {
    /// Validate `params` and `config`, build the grid and start the
    /// backend. The solver starts [`Idle`](SolverState::Idle).
    pub fn new(params: HeatParams, config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        params.validate()?;
        let grid = Grid::new(&params)?;
        let backend = backend::build(config.backend)?;
        tracing::debug!(
            backend = config.backend.name(),
            workers = config.backend.resolved_workers(),
            room_size = params.room_size,
            algorithm = %params.algorithm,
            "solver created"
        );
        Ok(Self {
            params,
            config,
            grid,
            backend,
            state: SolverState::Idle,
            rounds: 0,
            started: None,
            elapsed: Duration::ZERO,
            last_metrics: RoundMetrics::default(),
            fault: None,
        })
    }

    /// Run one round.
    ///
    /// - From `Idle` or `Running`: computes the round and returns its
    ///   metrics. The first round of a run starts the timer.
    /// - From `Stabilized`: does nothing and returns the last round's
    ///   metrics again.
    /// - From `Diverged`: returns [`SolveError::DidNotConverge`] again.
    /// - From `Failed`: returns the error that caused the failure.
    ///
    /// Reaching the round cap without stabilizing moves the solver to
    /// `Diverged` and returns [`SolveError::DidNotConverge`].
    pub fn step(&mut self) -> Result<RoundMetrics, SolveError> {
        match self.state {
            SolverState::Stabilized => return Ok(self.last_metrics.clone()),
            SolverState::Diverged => {
                return Err(SolveError::DidNotConverge {
                    rounds: self.rounds,
                })
            }
            SolverState::Failed => {
                return Err(self
                    .fault
                    .clone()
                    .unwrap_or(SolveError::DidNotConverge {
                        rounds: self.rounds,
                    }))
            }
            SolverState::Idle | SolverState::Running => {}
        }
        let run_start = *self.started.get_or_insert_with(Instant::now);
        self.state = SolverState::Running;

        let round_start = Instant::now();
        let schedule = Phase::schedule(self.params.algorithm);
        let mut metrics = RoundMetrics {
            round: self.rounds + 1,
            phases: 0,
            stable: true,
            ..RoundMetrics::default()
        };
        for &phase in schedule {
            let report = match self.backend.run_phase(&mut self.grid, phase) {
                Ok(report) => report,
                Err(e) => return Err(self.fail(e)),
            };
            self.grid.swap();
            metrics.phases += 1;
            metrics.compute_us += report.compute_us;
            metrics.exchange_us += report.exchange_us;
            metrics.stable &= report.stable;
        }
        metrics.total_us = micros(round_start.elapsed());
        self.rounds += 1;
        self.elapsed = run_start.elapsed();
        tracing::debug!(
            round = metrics.round,
            phases = metrics.phases,
            compute_us = metrics.compute_us,
            exchange_us = metrics.exchange_us,
            total_us = metrics.total_us,
            stable = metrics.stable,
            "round complete"
        );
        self.last_metrics = metrics.clone();

        if metrics.stable {
            self.state = SolverState::Stabilized;
            tracing::info!(
                rounds = self.rounds,
                elapsed_ms = self.elapsed.as_millis() as u64,
                backend = self.backend.kind().name(),
                "field stabilized"
            );
        } else if self.config.max_rounds.is_some_and(|cap| self.rounds >= cap) {
            self.state = SolverState::Diverged;
            tracing::warn!(rounds = self.rounds, "round cap reached before stabilizing");
            return Err(SolveError::DidNotConverge {
                rounds: self.rounds,
            });
        }
        Ok(metrics)
    }

    /// Step until the field stabilizes, returning the number of rounds
    /// in this run.
    ///
    /// Without a round cap this does not return for parameters that never
    /// stabilize. Called on a stabilized solver it runs no rounds.
    pub fn run_to_convergence(&mut self) -> Result<u64, SolveError> {
        while self.state != SolverState::Stabilized {
            self.step()?;
        }
        Ok(self.rounds)
    }

    /// Switch to new parameters.
    ///
    /// Identical parameters are a no-op. Otherwise:
    /// - a different `room_size` rebuilds the grid from scratch;
    /// - the same `room_size` keeps every free cell and re-pins the
    ///   border and source;
    ///
    /// and a stabilized or diverged solver goes back to `Running` with the
    /// round count and timer reset. On error nothing changes.
    pub fn set_params(&mut self, params: HeatParams) -> Result<(), ConfigError> {
        params.validate()?;
        if params == self.params {
            return Ok(());
        }
        if params.room_size != self.params.room_size {
            self.grid = Grid::new(&params)?;
            tracing::debug!(room_size = params.room_size, "grid rebuilt");
        } else {
            if !params.same_pins(&self.params) {
                tracing::debug!(
                    border = params.border_temp,
                    source = params.source_temp,
                    source_x = params.source_x,
                    source_y = params.source_y,
                    "re-pinning grid"
                );
            }
            self.grid.repin(&params)?;
        }
        self.params = params;
        self.rounds = 0;
        self.started = None;
        self.elapsed = Duration::ZERO;
        if matches!(self.state, SolverState::Stabilized | SolverState::Diverged) {
            self.state = SolverState::Running;
        }
        Ok(())
    }

    /// Read-only view of the current field.
    pub fn view(&self) -> FieldView<'_> {
        self.grid.view()
    }

    /// Whether the field has stabilized.
    pub fn is_stabilized(&self) -> bool {
        self.state == SolverState::Stabilized
    }

    /// Time from the first round of this run to the latest completed
    /// round, or to stabilization once stabilized.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Rounds completed in this run.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Metrics of the most recent round.
    pub fn last_metrics(&self) -> &RoundMetrics {
        &self.last_metrics
    }

    /// Parameters of the current run.
    pub fn params(&self) -> &HeatParams {
        &self.params
    }

    /// The backend in use.
    pub fn backend(&self) -> BackendKind {
        self.backend.kind()
    }

    fn fail(&mut self, e: SolveError) -> SolveError {
        tracing::error!(error = %e, round = self.rounds + 1, "round failed");
        self.state = SolverState::Failed;
        self.fault = Some(e.clone());
        e
    }
}
