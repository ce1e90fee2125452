//! Shared-memory backend with dynamic row claiming.

use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Instant;

use hearth_core::{HeatParams, Phase};
use hearth_grid::{FieldView, Grid, GridError, RowWriter};
use hearth_partition::{RowClaim, RowRange};
use hearth_stencil::sweep_row;

use super::Backend;
use crate::config::BackendKind;
use crate::error::{CoordinationError, SolveError};
use crate::metrics::{micros, PhaseReport};
use crate::sync::StabilityFlag;

/// Scoped worker threads writing disjoint rows of the shared alternate
/// buffer.
///
/// Each phase spawns `workers` scoped threads. They draw row indices from
/// one [`RowClaim`] until it runs dry, sweep each claimed row through its
/// [`RowWriter`], and fold their local stability into a
/// [`StabilityFlag`]. Joining the scope is the phase barrier.
///
/// A claimed row's writer sits behind its own mutex. The claim hands each
/// index to one thread only, so every lock is taken exactly once per phase
/// and never contended.
#[derive(Clone, Copy, Debug)]
pub struct ThreadPoolBackend {
    workers: usize,
}

impl ThreadPoolBackend {
    /// A backend running `workers` threads per phase (at least one).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Threads spawned per phase.
    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Backend for ThreadPoolBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Threads {
            workers: Some(self.workers),
        }
    }

    fn run_phase(&mut self, grid: &mut Grid, phase: Phase) -> Result<PhaseReport, SolveError> {
        let start = Instant::now();
        let params = *grid.params();
        let (view, staging) = grid.stage();
        let rows: Vec<Mutex<RowWriter<'_>>> =
            staging.into_rows().into_iter().map(Mutex::new).collect();
        let claim = RowClaim::new(RowRange::interior(params.room_size));
        let flag = StabilityFlag::new();

        thread::scope(|s| {
            let mut handles = Vec::with_capacity(self.workers);
            let mut failure: Option<SolveError> = None;
            for worker in 0..self.workers {
                let spawned = thread::Builder::new()
                    .name(format!("hearth-worker-{worker}"))
                    .spawn_scoped(s, || claim_rows(&claim, &rows, &view, &params, phase, &flag));
                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(e) => {
                        failure = Some(
                            CoordinationError::SpawnFailed {
                                reason: format!("worker {worker}: {e}"),
                            }
                            .into(),
                        );
                        break;
                    }
                }
            }
            for (worker, handle) in handles {
                let err = match handle.join() {
                    Ok(Ok(())) => continue,
                    Ok(Err(e)) => SolveError::Grid(e),
                    Err(_) => CoordinationError::WorkerPanicked { worker }.into(),
                };
                failure.get_or_insert(err);
            }
            failure.map_or(Ok(()), Err)
        })?;

        Ok(PhaseReport {
            stable: flag.get(),
            compute_us: micros(start.elapsed()),
            exchange_us: 0,
        })
    }
}

fn claim_rows(
    claim: &RowClaim,
    rows: &[Mutex<RowWriter<'_>>],
    view: &FieldView<'_>,
    params: &HeatParams,
    phase: Phase,
    flag: &StabilityFlag,
) -> Result<(), GridError> {
    let mut stable = true;
    while let Some(i) = claim.claim() {
        let mut row = rows[i - 1].lock().unwrap_or_else(PoisonError::into_inner);
        stable &= sweep_row(&mut row, view, params, phase)?;
    }
    flag.fold(stable);
    Ok(())
}
