//! Successor generation over the four cardinal neighbors.

use gridwalk_kernel::grid::{Direction, Position, CARDINAL_DIRECTIONS};

use crate::contract::{MapError, MapProviderV1};
use crate::error::SearchError;
use crate::node::GridNodeV1;

/// What the map says about one neighbor cell.
#[derive(Debug, Clone)]
pub enum NeighborV1 {
    /// Enterable; carries a freshly constructed node.
    Passable(GridNodeV1),
    /// Outside the grid. Skipped, never surfaced.
    OutOfBounds(Position),
    /// Negative cell cost. Skipped, never surfaced.
    Impassable { position: Position, cost: i64 },
}

/// Classify the neighbors of `position` in [`CARDINAL_DIRECTIONS`] order.
///
/// # Errors
///
/// Returns [`SearchError::Map`] only for map failures other than
/// [`MapError::OutOfBounds`], which is absorbed as a skipped neighbor.
pub fn scan_neighbors(
    position: Position,
    map: &dyn MapProviderV1,
) -> Result<Vec<(Direction, NeighborV1)>, SearchError> {
    let mut neighbors = Vec::with_capacity(CARDINAL_DIRECTIONS.len());
    for direction in CARDINAL_DIRECTIONS {
        let next = position.step(direction);
        let neighbor = match map.cost(next) {
            Ok(cost) if cost >= 0 => NeighborV1::Passable(GridNodeV1::new(next)),
            Ok(cost) => NeighborV1::Impassable {
                position: next,
                cost,
            },
            Err(MapError::OutOfBounds { .. }) => NeighborV1::OutOfBounds(next),
            Err(e) => return Err(e.into()),
        };
        neighbors.push((direction, neighbor));
    }
    Ok(neighbors)
}

/// Fresh successor nodes of `node`: up to four, in up/down/left/right order,
/// excluding out-of-bounds and impassable cells.
///
/// Positions may repeat across calls; deduplication belongs to the frontier.
///
/// # Errors
///
/// See [`scan_neighbors`].
pub fn generate_successors(
    node: &GridNodeV1,
    map: &dyn MapProviderV1,
) -> Result<Vec<GridNodeV1>, SearchError> {
    Ok(scan_neighbors(node.position(), map)?
        .into_iter()
        .filter_map(|(_, neighbor)| match neighbor {
            NeighborV1::Passable(n) => Some(n),
            NeighborV1::OutOfBounds(_) | NeighborV1::Impassable { .. } => None,
        })
        .collect())
}
