//! Concurrent claiming hands every interior row to exactly one thread.

use std::thread;

use hearth_partition::{RowClaim, RowRange, StaticPartition};
use hearth_test_utils::assert_exact_cover;
use proptest::prelude::*;

fn claim_concurrently(room_size: usize, workers: usize) -> Vec<Vec<usize>> {
    let claim = RowClaim::new(RowRange::interior(room_size));
    let per_worker = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                s.spawn(|| {
                    let mut mine = Vec::new();
                    while let Some(row) = claim.claim() {
                        mine.push(row);
                    }
                    mine
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert_eq!(claim.remaining(), 0);
    assert_eq!(claim.claim(), None);
    per_worker
}

#[test]
fn many_threads_on_a_large_room() {
    let claimed = claim_concurrently(1002, 8);
    assert_exact_cover(claimed.into_iter().flatten(), 1..1001);
}

#[test]
fn more_threads_than_rows() {
    let claimed = claim_concurrently(5, 16);
    assert_exact_cover(claimed.into_iter().flatten(), 1..4);
}

#[test]
fn each_thread_sees_rows_top_down() {
    for rows in claim_concurrently(200, 4) {
        assert!(rows.windows(2).all(|w| w[0] > w[1]), "{rows:?}");
    }
}

#[test]
fn static_blocks_cover_interior() {
    for workers in 1..=12 {
        let p = StaticPartition::new(37, workers).unwrap();
        let rows = p.ranges().iter().flat_map(|r| r.rows());
        assert_exact_cover(rows, 1..36);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn claim_covers_interior_for_any_worker_count(
        room in 3usize..120,
        workers in 1usize..12,
    ) {
        let claimed = claim_concurrently(room, workers);
        prop_assert_eq!(claimed.len(), workers);
        assert_exact_cover(claimed.into_iter().flatten(), 1..room - 1);
    }
}
