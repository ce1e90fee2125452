//! Criterion benchmarks comparing execution backends.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hearth_bench::{backend_matrix, reference_profile, small_profile};
use hearth_core::Algorithm;
use hearth_engine::{HeatSolver, SolverConfig};

/// Benchmark: 10 rounds on the 300×300 reference room, per backend.
fn bench_ten_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("ten_rounds_300");
    for algorithm in [Algorithm::Jacobi, Algorithm::Sor] {
        let params = reference_profile(algorithm);
        for (label, kind) in backend_matrix() {
            let mut solver = HeatSolver::new(params, SolverConfig::with_backend(kind)).unwrap();
            group.bench_function(BenchmarkId::new(label, algorithm), |b| {
                b.iter(|| {
                    for _ in 0..10 {
                        black_box(solver.step().unwrap());
                    }
                });
            });
        }
    }
    group.finish();
}

/// Benchmark: full convergence on a 64×64 room, per backend.
fn bench_converge_small(c: &mut Criterion) {
    let mut group = c.benchmark_group("converge_64");
    group.sample_size(10);
    for (label, kind) in backend_matrix() {
        let config = SolverConfig::with_backend(kind);
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut solver =
                    HeatSolver::new(small_profile(Algorithm::Sor), config.clone()).unwrap();
                black_box(solver.run_to_convergence().unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ten_rounds, bench_converge_small);
criterion_main!(benches);
