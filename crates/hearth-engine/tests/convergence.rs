//! End-to-end runs: convergence, field shape, and re-running a stable
//! solver.

use hearth_engine::{BackendKind, HeatSolver, SolveError, SolverConfig, SolverState};
use hearth_test_utils::{assert_pins_intact, fixtures};

#[test]
fn hot_center_stabilizes_with_falling_rays() {
    let params = fixtures::hot_center(10);
    assert_eq!((params.source_x, params.source_y), (5, 5));
    let mut solver = HeatSolver::new(params, SolverConfig::default()).unwrap();
    let rounds = solver.run_to_convergence().unwrap();
    assert!(rounds < 5000, "took {rounds} rounds");
    assert!(solver.is_stabilized());
    assert!(solver.elapsed() > std::time::Duration::ZERO);

    let view = solver.view();
    // Temperature falls with distance from the source along row 5 and
    // column 5 in every direction.
    for k in 5..9 {
        assert!(view.get(5, k) > view.get(5, k + 1), "row 5, col {k}");
        assert!(view.get(k, 5) > view.get(k + 1, 5), "col 5, row {k}");
    }
    for k in 1..=5 {
        assert!(view.get(5, k) > view.get(5, k - 1), "row 5, col {k}");
        assert!(view.get(k, 5) > view.get(k - 1, 5), "col 5, row {k}");
    }
    assert_pins_intact(&view, &params);
}

#[test]
fn sor_stabilizes_faster_than_jacobi() {
    let jacobi = fixtures::hot_center(24);
    let sor = fixtures::hot_center_sor(24, 1.5);
    let mut a = HeatSolver::new(jacobi, SolverConfig::default()).unwrap();
    let mut b = HeatSolver::new(sor, SolverConfig::default()).unwrap();
    let ra = a.run_to_convergence().unwrap();
    let rb = b.run_to_convergence().unwrap();
    assert!(rb < ra, "sor {rb} rounds, jacobi {ra} rounds");
}

#[test]
fn rerun_after_stabilizing_changes_nothing() {
    for kind in fixtures::all_backends() {
        let mut solver =
            HeatSolver::new(fixtures::hot_center(9), SolverConfig::with_backend(kind)).unwrap();
        let rounds = solver.run_to_convergence().unwrap();
        let field = solver.view().as_slice().to_vec();
        let elapsed = solver.elapsed();

        assert_eq!(solver.run_to_convergence().unwrap(), rounds, "{kind:?}");
        solver.step().unwrap();
        assert_eq!(solver.rounds(), rounds, "{kind:?}");
        assert_eq!(solver.elapsed(), elapsed, "{kind:?}");
        assert_eq!(solver.view().as_slice(), &field[..], "{kind:?}");
    }
}

#[test]
fn round_cap_applies_to_every_backend() {
    for kind in fixtures::all_backends() {
        let config = SolverConfig {
            backend: kind,
            max_rounds: Some(2),
        };
        let mut solver = HeatSolver::new(fixtures::hot_center(12), config).unwrap();
        match solver.run_to_convergence() {
            Err(SolveError::DidNotConverge { rounds: 2 }) => {}
            other => panic!("{kind:?}: expected DidNotConverge, got {other:?}"),
        }
        assert_eq!(solver.state(), SolverState::Diverged);
    }
}

#[test]
fn parameter_change_resumes_from_diverged() {
    let config = SolverConfig {
        backend: BackendKind::Threads { workers: Some(2) },
        max_rounds: Some(1),
    };
    let mut solver = HeatSolver::new(fixtures::hot_center(8), config).unwrap();
    assert!(solver.step().is_err());
    assert_eq!(solver.state(), SolverState::Diverged);

    let mut relaxed = fixtures::hot_center(8);
    relaxed.tolerance = 1000.0;
    solver.set_params(relaxed).unwrap();
    assert_eq!(solver.state(), SolverState::Running);
    assert!(solver.step().unwrap().stable);
    assert!(solver.is_stabilized());
}
