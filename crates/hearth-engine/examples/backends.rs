//! Drive every backend to convergence and print the result.
//!
//! Run with `RUST_LOG=hearth_engine=debug` to see per-round logs.

use hearth_core::{temp_to_rgb, Algorithm, HeatParams};
use hearth_engine::{BackendKind, HeatSolver, SolverConfig};
use hearth_grid::FieldView;
use tracing_subscriber::EnvFilter;

const RAMP: &[u8] = b" .:-=+*#%@";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Hearth backends ===\n");

    let base = HeatParams {
        border_temp: 0.0,
        source_temp: 100.0,
        tolerance: 0.01,
        ..HeatParams::with_room_size(96)
    };
    let backends = [
        BackendKind::Sequential,
        BackendKind::Threads { workers: None },
        BackendKind::MessagePassing { ranks: 4 },
        BackendKind::Hybrid {
            ranks: 2,
            threads_per_rank: 2,
        },
    ];

    for algorithm in [Algorithm::Jacobi, Algorithm::Sor] {
        let params = HeatParams {
            algorithm,
            sor_constant: 1.8,
            ..base
        };
        println!("{algorithm}:");
        for kind in backends {
            let mut solver = match HeatSolver::new(params, SolverConfig::with_backend(kind)) {
                Ok(solver) => solver,
                Err(e) => {
                    eprintln!("  {:<16} failed to start: {e}", kind.name());
                    continue;
                }
            };
            match solver.run_to_convergence() {
                Ok(rounds) => println!(
                    "  {:<16} {:>6} rounds  {:>10.3?}  ({} workers)",
                    kind.name(),
                    rounds,
                    solver.elapsed(),
                    kind.resolved_workers(),
                ),
                Err(e) => eprintln!("  {:<16} failed: {e}", kind.name()),
            }
        }
        println!();
    }

    let mut solver = match HeatSolver::new(base, SolverConfig::default()) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("failed to start: {e}");
            return;
        }
    };
    if let Err(e) = solver.run_to_convergence() {
        eprintln!("failed: {e}");
        return;
    }
    println!("Heat map ({}×{}):", base.room_size, base.room_size);
    print_heat_map(&solver.view(), 32);
}

/// Print the field downsampled to `cols` characters across.
fn print_heat_map(view: &FieldView<'_>, cols: usize) {
    let n = view.room_size();
    let step = n.div_ceil(cols).max(1);
    for i in (0..n).step_by(step * 2) {
        let line: String = (0..n)
            .step_by(step)
            .map(|j| {
                let [red, _, _] = temp_to_rgb(view.get(i, j));
                RAMP[usize::from(red) * (RAMP.len() - 1) / 255] as char
            })
            .collect();
        println!("  {line}");
    }
}
