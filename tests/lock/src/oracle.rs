//! Reference shortest-path costs for cross-checking the search.
//!
//! Plain Dijkstra over the same cost model as the search: entering a cell
//! costs its value, the start cell is free, negative cells are walls.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use gridwalk_kernel::grid::{Position, CARDINAL_DIRECTIONS};
use gridwalk_search::contract::MapProviderV1;

/// Least total cost from start to goal, or `None` if unreachable.
///
/// # Panics
///
/// Panics if the map rejects the start position. Test-only helper.
#[must_use]
pub fn dijkstra_cost(map: &dyn MapProviderV1) -> Option<i64> {
    let start = map.start_position();
    let goal = map.goal_position();
    map.cost(start).expect("start lies inside the grid");

    let mut best: BTreeMap<Position, i64> = BTreeMap::new();
    let mut heap = BinaryHeap::new();
    best.insert(start, 0);
    heap.push(Reverse((0_i64, start)));

    while let Some(Reverse((dist, position))) = heap.pop() {
        if position == goal {
            return Some(dist);
        }
        if best.get(&position).is_some_and(|&d| d < dist) {
            continue;
        }
        for direction in CARDINAL_DIRECTIONS {
            let next = position.step(direction);
            let Ok(cost) = map.cost(next) else {
                continue;
            };
            if cost < 0 {
                continue;
            }
            let candidate = dist + cost;
            if candidate < best.get(&next).copied().unwrap_or(i64::MAX) {
                best.insert(next, candidate);
                heap.push(Reverse((candidate, next)));
            }
        }
    }
    None
}
