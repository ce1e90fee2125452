//! Single-worker reference backend.

use std::time::Instant;

use hearth_core::Phase;
use hearth_grid::Grid;
use hearth_stencil::sweep_rows;

use super::Backend;
use crate::config::BackendKind;
use crate::error::SolveError;
use crate::metrics::{micros, PhaseReport};

/// Sweeps every interior row on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialBackend;

impl Backend for SequentialBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Sequential
    }

    fn run_phase(&mut self, grid: &mut Grid, phase: Phase) -> Result<PhaseReport, SolveError> {
        let start = Instant::now();
        let params = *grid.params();
        let (view, staging) = grid.stage();
        let mut rows = staging.into_rows();
        let stable = sweep_rows(rows.iter_mut(), &view, &params, phase)?;
        Ok(PhaseReport {
            stable,
            compute_us: micros(start.elapsed()),
            exchange_us: 0,
        })
    }
}
