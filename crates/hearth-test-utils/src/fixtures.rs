//! Reusable parameter and backend fixtures.

use hearth_core::{Algorithm, HeatParams};
use hearth_engine::BackendKind;

/// Cold room with a hot source in the middle.
///
/// Border 0, source 100 at `(room_size / 2, room_size / 2)`,
/// tolerance 0.01, Jacobi.
pub fn hot_center(room_size: usize) -> HeatParams {
    HeatParams {
        border_temp: 0.0,
        source_temp: 100.0,
        tolerance: 0.01,
        ..HeatParams::with_room_size(room_size)
    }
}

/// [`hot_center`] relaxed with red-black SOR at `omega`.
pub fn hot_center_sor(room_size: usize, omega: f64) -> HeatParams {
    HeatParams {
        algorithm: Algorithm::Sor,
        sor_constant: omega,
        ..hot_center(room_size)
    }
}

/// Source placed off-center, next to the top-left corner.
pub fn corner_source(room_size: usize) -> HeatParams {
    HeatParams {
        source_x: 1,
        source_y: 1,
        ..hot_center(room_size)
    }
}

/// One instance of every backend, with small explicit counts so tests
/// exercise uneven partitions.
pub fn all_backends() -> Vec<BackendKind> {
    vec![
        BackendKind::Sequential,
        BackendKind::Threads { workers: Some(1) },
        BackendKind::Threads { workers: Some(3) },
        BackendKind::MessagePassing { ranks: 1 },
        BackendKind::MessagePassing { ranks: 3 },
        BackendKind::Hybrid {
            ranks: 2,
            threads_per_rank: 3,
        },
    ]
}
