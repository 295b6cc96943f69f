//! Structural checks on a reconstructed path.

use gridwalk_kernel::grid::Position;
use gridwalk_search::node::NodeArena;
use gridwalk_search::path::PathV1;

/// `g_cost` of each path cell, start first, looked up in the arena.
///
/// # Panics
///
/// Panics if a path cell has no node. Test-only helper.
#[must_use]
pub fn g_along_path(nodes: &NodeArena, path: &PathV1) -> Vec<i64> {
    path.cells
        .iter()
        .map(|&p| {
            let id = nodes.lookup(p).unwrap();
            nodes.get(id).unwrap().g_cost()
        })
        .collect()
}

/// True if consecutive cells differ by exactly one cardinal step.
#[must_use]
pub fn is_connected(cells: &[Position]) -> bool {
    cells.windows(2).all(|w| w[0].manhattan(w[1]) == 1)
}
