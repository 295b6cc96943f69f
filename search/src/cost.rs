//! Cost evaluation: attaching a node to a parent and pushing improvements
//! down the discovery tree.
//!
//! These two functions are the only writers of `g_cost`, `h_cost` and
//! `parent_id` once a node is in the arena.

use tracing::trace;

use crate::contract::MapProviderV1;
use crate::error::SearchError;
use crate::node::NodeArena;

/// Before/after `g_cost` of a node touched by [`attach_and_eval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostUpdate {
    pub previous_g: i64,
    pub new_g: i64,
}

fn missing(node_id: u64) -> SearchError {
    SearchError::UnknownNode { node_id }
}

/// Make `parent` the parent of `child` and recompute the child's costs:
/// `g = parent.g + cost(child)`, `h = manhattan(child, goal)`.
///
/// Mutates only `child`.
///
/// # Errors
///
/// Returns [`SearchError::Map`] if the map cannot price the child's cell, or
/// [`SearchError::UnknownNode`] if either id is not in the arena.
pub fn attach_and_eval(
    arena: &mut NodeArena,
    child: u64,
    parent: u64,
    map: &dyn MapProviderV1,
) -> Result<CostUpdate, SearchError> {
    let parent_g = arena.get(parent).ok_or_else(|| missing(parent))?.g_cost();
    let position = arena.get(child).ok_or_else(|| missing(child))?.position();
    let step = map.cost(position)?;
    let h_cost = position.manhattan(map.goal_position());

    let node = arena.get_mut(child).ok_or_else(|| missing(child))?;
    let previous_g = node.g_cost;
    node.parent_id = Some(parent);
    node.g_cost = parent_g.saturating_add(step);
    node.h_cost = h_cost;
    Ok(CostUpdate {
        previous_g,
        new_g: node.g_cost,
    })
}

/// Push a cost improvement at `node_id` to its recorded children,
/// transitively.
///
/// For each recorded child, if routing through its discoverer is now
/// strictly cheaper than the child's current `g`, the child is re-parented,
/// its `g` lowered (`h` is positional and stays), and the same check runs on
/// the child's own children. Every recorded child is considered, whether or
/// not it is still parented by the node that discovered it.
///
/// Traversal is depth-first in recorded order on an explicit stack, so long
/// paths cannot exhaust the call stack. Returns the updated node ids in the
/// order they were updated.
///
/// # Errors
///
/// Returns [`SearchError::Map`] if the map cannot price a child's cell.
pub fn propagate(
    arena: &mut NodeArena,
    node_id: u64,
    map: &dyn MapProviderV1,
) -> Result<Vec<u64>, SearchError> {
    let mut updated = Vec::new();
    // (node, index of next child to examine)
    let mut stack: Vec<(u64, usize)> = vec![(node_id, 0)];

    while let Some(frame) = stack.last_mut() {
        let (current, next_child) = *frame;
        let node = arena.get(current).ok_or_else(|| missing(current))?;
        let Some(&child) = node.children().get(next_child) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;
        let current_g = node.g_cost();

        let child_node = arena.get(child).ok_or_else(|| missing(child))?;
        let via = current_g.saturating_add(map.cost(child_node.position())?);
        if via < child_node.g_cost() {
            let child_mut = arena.get_mut(child).ok_or_else(|| missing(child))?;
            trace!(
                node_id = child,
                from = child_mut.g_cost,
                to = via,
                parent = current,
                "propagated cost improvement"
            );
            child_mut.parent_id = Some(current);
            child_mut.g_cost = via;
            updated.push(child);
            stack.push((child, 0));
        }
    }

    Ok(updated)
}
