//! Message-passing backend: ranks that share no memory.
//!
//! Rank 0 is the coordinator and runs on the solver's own thread. Ranks
//! `1..size` are long-lived named threads spawned with the backend. Each
//! phase follows a fixed protocol:
//!
//! ```text
//! rank 0                               rank r
//! ──────                               ──────
//! send Round { phase, params }  ──▶    recv Control
//! broadcast Field(snapshot)     ──▶    restore into local grid
//! sweep own block in place             sweep own block into local staging
//! gather Rows                   ◀──    send own block's rows
//! copy gathered rows into staging
//! all_reduce_and(local)         ◀─▶    all_reduce_and(local)
//! ```
//!
//! Every rank receives the full field but only returns its own rows.
//!
//! With `threads_per_rank > 1` (the hybrid backend) each rank sweeps its
//! block on a private rayon pool; the pool's join is the intra-rank
//! barrier before the rank-level exchange.

use std::thread::{self, JoinHandle};
use std::time::Instant;

use hearth_core::Phase;
use hearth_grid::Grid;

use super::{block_mut, static_block, sweep_block, Backend};
use crate::comm::{
    all_reduce_and, broadcast, gather, unexpected, ChannelComm, Communicator, Message, Tag,
};
use crate::config::BackendKind;
use crate::error::{ConfigError, CoordinationError, SolveError};
use crate::metrics::{micros, PhaseReport};

const ROOT: usize = 0;

/// Coordinator endpoint of a message-passing world.
///
/// Dropping the backend sends `Stop` to every rank and joins them.
pub struct MessagePassingBackend {
    comm: ChannelComm,
    pool: Option<rayon::ThreadPool>,
    threads_per_rank: usize,
    ranks: Vec<JoinHandle<()>>,
}

impl MessagePassingBackend {
    /// Spawn a world of `ranks` single-threaded ranks.
    pub fn new(ranks: usize) -> Result<Self, ConfigError> {
        Self::hybrid(ranks, 1)
    }

    /// Spawn a world of `ranks` ranks, each sweeping on
    /// `threads_per_rank` threads.
    pub fn hybrid(ranks: usize, threads_per_rank: usize) -> Result<Self, ConfigError> {
        if ranks == 0 {
            return Err(ConfigError::ZeroWorkers { what: "ranks" });
        }
        if threads_per_rank == 0 {
            return Err(ConfigError::ZeroWorkers {
                what: "threads_per_rank",
            });
        }
        let mut world = ChannelComm::world(ranks).into_iter();
        let comm = world
            .next()
            .ok_or(ConfigError::ZeroWorkers { what: "ranks" })?;
        let pool = rank_pool(ROOT, threads_per_rank)?;

        let mut handles = Vec::with_capacity(ranks - 1);
        for endpoint in world {
            let rank = endpoint.rank();
            let pool = rank_pool(rank, threads_per_rank)?;
            let handle = thread::Builder::new()
                .name(format!("hearth-rank-{rank}"))
                .spawn(move || rank_main(endpoint, pool))
                .map_err(|e| ConfigError::ThreadSpawnFailed {
                    reason: format!("rank {rank}: {e}"),
                })?;
            handles.push(handle);
        }
        tracing::debug!(ranks, threads_per_rank, "message-passing world started");

        Ok(Self {
            comm,
            pool,
            threads_per_rank,
            ranks: handles,
        })
    }

    /// Number of ranks, including the coordinator.
    pub fn ranks(&self) -> usize {
        self.comm.size()
    }

    /// Stop every rank and wait for it to exit.
    ///
    /// Ranks idle between phases take the `Stop`; ranks stuck mid-phase
    /// after a failed round see the coordinator disconnect. Reports the
    /// first rank that panicked. Running a phase after shutdown fails with
    /// [`CoordinationError::PeerLost`].
    pub fn shutdown(&mut self) -> Result<(), CoordinationError> {
        for rank in 1..self.comm.size() {
            // A rank that already exited has dropped its inbox.
            let _ = self.comm.send(rank, Message::Stop);
        }
        self.comm.disconnect();
        let mut result = Ok(());
        for (k, handle) in self.ranks.drain(..).enumerate() {
            let rank = k + 1;
            if handle.join().is_err() {
                tracing::error!(rank, "rank panicked");
                if result.is_ok() {
                    result = Err(CoordinationError::WorkerPanicked { worker: rank });
                }
            }
        }
        result
    }
}

impl Backend for MessagePassingBackend {
    fn kind(&self) -> BackendKind {
        if self.threads_per_rank > 1 {
            BackendKind::Hybrid {
                ranks: self.comm.size(),
                threads_per_rank: self.threads_per_rank,
            }
        } else {
            BackendKind::MessagePassing {
                ranks: self.comm.size(),
            }
        }
    }

    fn run_phase(&mut self, grid: &mut Grid, phase: Phase) -> Result<PhaseReport, SolveError> {
        let params = *grid.params();
        let n = params.room_size;
        let size = self.comm.size();

        let exchange_start = Instant::now();
        for rank in 1..size {
            self.comm.send(rank, Message::Round { phase, params })?;
        }
        broadcast(
            &self.comm,
            ROOT,
            Tag::Field,
            Some(Message::Field(grid.snapshot())),
        )?;
        let mut exchange = exchange_start.elapsed();

        let own = static_block(n, size, ROOT)?;
        let (view, staging) = grid.stage();
        let mut rows = staging.into_rows();
        let compute_start = Instant::now();
        let local = sweep_block(
            block_mut(&mut rows, own),
            &view,
            &params,
            phase,
            self.pool.as_ref(),
        )?;
        let compute = compute_start.elapsed();

        let gather_start = Instant::now();
        // Rank 0 swept its block in place and contributes no values.
        let placeholder = Message::Rows {
            start: own.start,
            values: Vec::new(),
        };
        let gathered = gather(&self.comm, ROOT, placeholder)?.unwrap_or_default();
        for (rank, message) in gathered.into_iter().enumerate().skip(1) {
            let (start, values) = match message {
                Message::Rows { start, values } => (start, values),
                other => return Err(unexpected(rank, Tag::Rows, &other).into()),
            };
            let expected = static_block(n, size, rank)?;
            if start != expected.start || values.len() != expected.len() * n {
                return Err(CoordinationError::MalformedMessage {
                    from: rank,
                    reason: format!(
                        "expected {} ({} cells), got {} cells from row {start}",
                        expected,
                        expected.len() * n,
                        values.len()
                    ),
                }
                .into());
            }
            for (row, cells) in block_mut(&mut rows, expected)
                .iter_mut()
                .zip(values.chunks_exact(n))
            {
                row.copy_from(cells)?;
            }
        }
        let stable = all_reduce_and(&self.comm, local)?;
        exchange += gather_start.elapsed();

        Ok(PhaseReport {
            stable,
            compute_us: micros(compute),
            exchange_us: micros(exchange),
        })
    }
}

impl Drop for MessagePassingBackend {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            tracing::error!(error = %e, "message-passing shutdown failed");
        }
    }
}

fn rank_pool(rank: usize, threads: usize) -> Result<Option<rayon::ThreadPool>, ConfigError> {
    if threads <= 1 {
        return Ok(None);
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(move |i| format!("hearth-rank-{rank}-t{i}"))
        .build()
        .map(Some)
        .map_err(|e| ConfigError::ThreadSpawnFailed {
            reason: format!("rank {rank} pool: {e}"),
        })
}

fn rank_main(comm: ChannelComm, pool: Option<rayon::ThreadPool>) {
    let rank = comm.rank();
    tracing::debug!(rank, "rank started");
    match rank_loop(&comm, pool.as_ref()) {
        Ok(()) => tracing::debug!(rank, "rank stopped"),
        Err(e) => tracing::error!(rank, error = %e, "rank failed"),
    }
}

fn rank_loop(comm: &ChannelComm, pool: Option<&rayon::ThreadPool>) -> Result<(), SolveError> {
    let rank = comm.rank();
    let mut local: Option<Grid> = None;
    loop {
        let (phase, params) = match comm.recv(ROOT, Tag::Control) {
            Ok(Message::Round { phase, params }) => (phase, params),
            Ok(Message::Stop) => return Ok(()),
            // The coordinator was dropped without a Stop.
            Err(CoordinationError::PeerLost { .. }) => return Ok(()),
            Ok(other) => return Err(unexpected(ROOT, Tag::Control, &other).into()),
            Err(e) => return Err(e.into()),
        };
        let field = match broadcast(comm, ROOT, Tag::Field, None)? {
            Message::Field(field) => field,
            other => return Err(unexpected(ROOT, Tag::Field, &other).into()),
        };

        let grid = match local.take() {
            Some(grid) if *grid.params() == params => local.insert(grid),
            _ => local.insert(Grid::new(&params)?),
        };
        grid.restore(&field)?;

        let own = static_block(params.room_size, comm.size(), rank)?;
        let stable = {
            let (view, staging) = grid.stage();
            let mut rows = staging.into_rows();
            sweep_block(block_mut(&mut rows, own), &view, &params, phase, pool)?
        };
        let values = grid.other_rows(own.rows()).to_vec();
        gather(
            comm,
            ROOT,
            Message::Rows {
                start: own.start,
                values,
            },
        )?;
        all_reduce_and(comm, stable)?;
    }
}
