//! Execution backends.
//!
//! A [`Backend`] runs one phase: it fills the grid's alternate buffer for
//! every interior row and reports the global stability flag. It never
//! swaps buffers; the solver does that after each phase.
//!
//! | Backend | Row distribution | Exchange | Barrier |
//! |---------|------------------|----------|---------|
//! | [`SequentialBackend`] | one worker, all rows | none | none |
//! | [`ThreadPoolBackend`] | [`RowClaim`](hearth_partition::RowClaim) | shared buffer | scope join |
//! | [`MessagePassingBackend`] | [`StaticPartition`] | broadcast + gather | collectives |

mod message;
mod sequential;
mod threads;

pub use message::MessagePassingBackend;
pub use sequential::SequentialBackend;
pub use threads::ThreadPoolBackend;

use hearth_core::{HeatParams, Phase};
use hearth_grid::{FieldView, Grid, GridError, RowWriter};
use hearth_partition::{RowRange, StaticPartition};
use hearth_stencil::{sweep_row, sweep_rows};
use rayon::prelude::*;

use crate::config::{resolve, BackendKind};
use crate::error::{ConfigError, CoordinationError, SolveError};
use crate::metrics::PhaseReport;

/// Runs the phases of a round on some set of workers.
pub trait Backend: Send {
    /// Which kind of backend this is.
    fn kind(&self) -> BackendKind;

    /// Compute `phase` into the grid's alternate buffer.
    ///
    /// On success every free interior cell of the alternate buffer holds
    /// its value for this phase. The caller swaps.
    fn run_phase(&mut self, grid: &mut Grid, phase: Phase) -> Result<PhaseReport, SolveError>;
}

/// Build the backend described by `kind`.
///
/// Message-passing backends spawn their ranks here; they live until the
/// backend is dropped.
pub fn build(kind: BackendKind) -> Result<Box<dyn Backend>, ConfigError> {
    kind.validate()?;
    Ok(match kind {
        BackendKind::Sequential => Box::new(SequentialBackend),
        BackendKind::Threads { workers } => Box::new(ThreadPoolBackend::new(resolve(workers))),
        BackendKind::MessagePassing { ranks } => {
            Box::new(MessagePassingBackend::new(resolve(Some(ranks)))?)
        }
        BackendKind::Hybrid {
            ranks,
            threads_per_rank,
        } => Box::new(MessagePassingBackend::hybrid(
            resolve(Some(ranks)),
            resolve(Some(threads_per_rank)),
        )?),
    })
}

/// Rows owned by `rank` when the interior of a `room_size` room is split
/// among `ranks`.
pub(crate) fn static_block(
    room_size: usize,
    ranks: usize,
    rank: usize,
) -> Result<RowRange, CoordinationError> {
    StaticPartition::new(room_size, ranks)
        .ok()
        .and_then(|p| p.range(rank))
        .ok_or(CoordinationError::UnknownPeer { rank })
}

/// The writers for `range` out of a full `Staging::into_rows` vector.
pub(crate) fn block_mut<'r, 'a>(
    rows: &'r mut [RowWriter<'a>],
    range: RowRange,
) -> &'r mut [RowWriter<'a>] {
    // Element k of the vector writes row k + 1.
    &mut rows[range.start - 1..range.end - 1]
}

/// Sweep a block of rows, on `pool` when one is given.
pub(crate) fn sweep_block(
    rows: &mut [RowWriter<'_>],
    view: &FieldView<'_>,
    params: &HeatParams,
    phase: Phase,
    pool: Option<&rayon::ThreadPool>,
) -> Result<bool, GridError> {
    match pool {
        None => sweep_rows(rows.iter_mut(), view, params, phase),
        Some(pool) => pool.install(|| {
            rows.par_iter_mut()
                .map(|row| sweep_row(row, view, params, phase))
                .try_reduce(|| true, |a, b| Ok(a && b))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_honours_kind() {
        for kind in [
            BackendKind::Sequential,
            BackendKind::Threads { workers: Some(3) },
            BackendKind::MessagePassing { ranks: 2 },
            BackendKind::Hybrid {
                ranks: 2,
                threads_per_rank: 2,
            },
        ] {
            let backend = build(kind).unwrap();
            assert_eq!(backend.kind(), kind);
        }
    }

    #[test]
    fn build_rejects_zero_ranks() {
        match build(BackendKind::MessagePassing { ranks: 0 }) {
            Err(ConfigError::ZeroWorkers { what: "ranks" }) => {}
            Err(other) => panic!("expected ZeroWorkers, got {other:?}"),
            Ok(_) => panic!("expected ZeroWorkers, got a backend"),
        }
    }

    #[test]
    fn static_block_out_of_range_rank() {
        assert_eq!(static_block(10, 2, 1), Ok(RowRange::new(5, 9)));
        assert_eq!(
            static_block(10, 2, 2),
            Err(CoordinationError::UnknownPeer { rank: 2 })
        );
    }
}
