//! Property checks over seeded random grids.

use gridwalk_harness::grid_map::CostGridV1;
use gridwalk_kernel::grid::Position;
use gridwalk_search::contract::MapProviderV1;
use gridwalk_search::path::reconstruct_and_mark;
use gridwalk_search::policy::SearchPolicyV1;
use gridwalk_search::search::search;
use lock_tests::oracle::dijkstra_cost;
use lock_tests::path_checks::{g_along_path, is_connected};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GRID_COUNT: u64 = 200;

/// Costs in 1..=9 with roughly one wall in five. Start and goal are forced
/// passable.
fn random_grid(seed: u64) -> CostGridV1 {
    let mut rng = StdRng::seed_from_u64(seed);
    let width = rng.gen_range(2..=12_usize);
    let height = rng.gen_range(2..=12_usize);
    let mut cells: Vec<i64> = (0..width * height)
        .map(|_| {
            if rng.gen_bool(0.2) {
                -1
            } else {
                rng.gen_range(1..=9)
            }
        })
        .collect();

    let pick = |rng: &mut StdRng| {
        let row = rng.gen_range(0..height);
        let col = rng.gen_range(0..width);
        (row, col)
    };
    let (sr, sc) = pick(&mut rng);
    let (gr, gc) = pick(&mut rng);
    for (r, c) in [(sr, sc), (gr, gc)] {
        if cells[r * width + c] < 0 {
            cells[r * width + c] = 1;
        }
    }

    let pos = |r: usize, c: usize| {
        Position::new(i64::try_from(r).unwrap(), i64::try_from(c).unwrap())
    };
    CostGridV1::new(
        format!("random_{seed}"),
        width,
        height,
        cells,
        pos(sr, sc),
        pos(gr, gc),
    )
    .unwrap()
}

fn checked() -> SearchPolicyV1 {
    SearchPolicyV1 {
        check_frontier_invariants: true,
        ..SearchPolicyV1::default()
    }
}

#[test]
fn total_cost_matches_dijkstra() {
    let mut found = 0;
    for seed in 0..GRID_COUNT {
        let map = random_grid(seed);
        let result = search(&map, &checked()).unwrap();
        assert_eq!(
            result.total_cost(),
            dijkstra_cost(&map),
            "seed {seed}: search disagrees with Dijkstra"
        );
        if result.is_goal_reached() {
            found += 1;
        }
    }
    assert!(found > GRID_COUNT / 2, "too few solvable grids: {found}");
}

#[test]
fn g_is_non_decreasing_along_every_path() {
    for seed in 0..GRID_COUNT {
        let mut map = random_grid(seed);
        let result = search(&map, &SearchPolicyV1::default()).unwrap();
        if !result.is_goal_reached() {
            continue;
        }
        let path = reconstruct_and_mark(&result, &mut map, 5).unwrap();
        assert!(is_connected(&path.cells), "seed {seed}: path has a gap");
        assert_eq!(path.cells.first(), Some(&map.start_position()));
        assert_eq!(path.cells.last(), Some(&map.goal_position()));

        let g = g_along_path(&result.nodes, &path);
        assert!(
            g.windows(2).all(|w| w[0] <= w[1]),
            "seed {seed}: g decreases along path {g:?}"
        );
        assert_eq!(g.last().copied(), Some(path.total_cost));
    }
}

#[test]
fn repeated_search_is_idempotent() {
    for seed in 0..GRID_COUNT / 4 {
        let map = random_grid(seed);
        let first = search(&map, &SearchPolicyV1::default()).unwrap();
        let second = search(&map, &SearchPolicyV1::default()).unwrap();

        assert_eq!(first.outcome, second.outcome, "seed {seed}");
        assert_eq!(
            first.graph.to_canonical_json_bytes().unwrap(),
            second.graph.to_canonical_json_bytes().unwrap(),
            "seed {seed}: audit graphs differ"
        );
    }
}

#[test]
fn invariant_checks_never_fire() {
    for seed in 0..GRID_COUNT {
        let map = random_grid(seed);
        let result = search(&map, &checked()).unwrap();
        assert_ne!(
            result.graph.metadata.termination_reason.as_str(),
            "frontier_invariant_violation",
            "seed {seed}"
        );
        let closed = result
            .graph
            .node_summaries
            .iter()
            .filter(|s| s.membership == "closed")
            .count() as u64;
        assert_eq!(closed, result.graph.metadata.total_expansions, "seed {seed}");
    }
}

#[test]
fn marking_leaves_start_and_goal_untouched() {
    for seed in 0..GRID_COUNT / 4 {
        let mut map = random_grid(seed);
        let before = map.cells().to_vec();
        let result = search(&map, &SearchPolicyV1::default()).unwrap();
        if !result.is_goal_reached() {
            continue;
        }
        let path = reconstruct_and_mark(&result, &mut map, 5).unwrap();
        assert_eq!(path.marked.len(), path.cells.len().saturating_sub(2));
        for endpoint in [map.start_position(), map.goal_position()] {
            assert!(!map.marked().contains(&endpoint), "seed {seed}");
            assert_eq!(map.cost(endpoint).unwrap(), {
                let (r, c) = endpoint.to_indices().unwrap();
                before[r * map.width() + c]
            });
        }
    }
}
