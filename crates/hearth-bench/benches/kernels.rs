//! Criterion micro-benchmarks for the stencil sweep and row claiming.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hearth_bench::reference_profile;
use hearth_core::{Algorithm, Phase};
use hearth_grid::Grid;
use hearth_partition::{RowClaim, RowRange};
use hearth_stencil::sweep_rows;

/// Benchmark: one Jacobi sweep over every interior row of a 300×300 room.
fn bench_jacobi_sweep_300(c: &mut Criterion) {
    let params = reference_profile(Algorithm::Jacobi);
    let mut grid = Grid::new(&params).unwrap();

    c.bench_function("jacobi_sweep_300", |b| {
        b.iter(|| {
            let (view, staging) = grid.stage();
            let mut rows = staging.into_rows();
            black_box(sweep_rows(rows.iter_mut(), &view, &params, Phase::Jacobi).unwrap())
        });
    });
}

/// Benchmark: one SOR half-phase over a 300×300 room.
fn bench_sor_half_phase_300(c: &mut Criterion) {
    let params = reference_profile(Algorithm::Sor);
    let mut grid = Grid::new(&params).unwrap();

    c.bench_function("sor_half_phase_300", |b| {
        b.iter(|| {
            let (view, staging) = grid.stage();
            let mut rows = staging.into_rows();
            black_box(sweep_rows(rows.iter_mut(), &view, &params, Phase::Color(0)).unwrap())
        });
    });
}

/// Benchmark: drain a row claim of 10K rows on one thread.
fn bench_claim_drain_10k(c: &mut Criterion) {
    c.bench_function("claim_drain_10k", |b| {
        b.iter(|| {
            let claim = RowClaim::new(RowRange::new(1, 10_001));
            let mut sum = 0usize;
            while let Some(row) = claim.claim() {
                sum += row;
            }
            black_box(sum)
        });
    });
}

criterion_group!(
    benches,
    bench_jacobi_sweep_300,
    bench_sor_half_phase_300,
    bench_claim_drain_10k
);
criterion_main!(benches);
