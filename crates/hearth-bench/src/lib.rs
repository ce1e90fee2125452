//! Benchmark profiles for the Hearth heat solver.
//!
//! - [`reference_profile`]: the default 300×300 room
//! - [`small_profile`]: a 64×64 room for quick iterations
//! - [`backend_matrix`]: the backend configurations compared by the
//!   `backends` bench

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use hearth_core::{Algorithm, HeatParams};
use hearth_engine::BackendKind;

/// The default room: 300×300, border 36, source 100 at the center.
pub fn reference_profile(algorithm: Algorithm) -> HeatParams {
    HeatParams {
        algorithm,
        ..HeatParams::default()
    }
}

/// 64×64 room with a cold border, for benchmarks that run to
/// convergence.
pub fn small_profile(algorithm: Algorithm) -> HeatParams {
    HeatParams {
        border_temp: 0.0,
        source_temp: 100.0,
        tolerance: 0.05,
        algorithm,
        ..HeatParams::with_room_size(64)
    }
}

/// `(label, backend)` pairs sized to the machine.
pub fn backend_matrix() -> Vec<(String, BackendKind)> {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .clamp(2, 16);
    let half = (cpus / 2).max(1);
    vec![
        ("sequential".into(), BackendKind::Sequential),
        (
            format!("threads_{cpus}"),
            BackendKind::Threads {
                workers: Some(cpus),
            },
        ),
        (
            format!("message_passing_{cpus}"),
            BackendKind::MessagePassing { ranks: cpus },
        ),
        (
            format!("hybrid_{half}x2"),
            BackendKind::Hybrid {
                ranks: half,
                threads_per_rank: 2,
            },
        ),
    ]
}
