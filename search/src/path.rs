//! Path reconstruction: walk parent links from the goal back to the start
//! and flag the cells in between on the map.

use gridwalk_kernel::grid::Position;
use tracing::debug;

use crate::contract::{MapError, MapProviderV1};
use crate::graph::{position_to_json, TerminationReasonV1};
use crate::node::NodeArena;
use crate::search::{SearchOutcomeV1, SearchResult};

/// A reconstructed start→goal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathV1 {
    /// Every cell from start to goal inclusive.
    pub cells: Vec<Position>,
    /// `g_cost` of the goal.
    pub total_cost: i64,
    /// Cells handed to `mark_path_cell`, in marking order (goal side first).
    pub marked: Vec<Position>,
    pub marker: i64,
}

impl PathV1 {
    /// `path.json` form of a found path.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cells": self.cells.iter().copied().map(position_to_json).collect::<Vec<_>>(),
            "found": true,
            "marked": self.marked.iter().copied().map(position_to_json).collect::<Vec<_>>(),
            "marker": self.marker,
            "total_cost": self.total_cost,
        })
    }
}

/// `path.json` form when the search produced no goal node.
#[must_use]
pub fn no_path_json(reason: &TerminationReasonV1) -> serde_json::Value {
    serde_json::json!({
        "found": false,
        "termination_reason": reason.as_str(),
    })
}

/// Path reconstruction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Reconstruction was requested for a search that did not reach the goal.
    MissingResult { termination: TerminationReasonV1 },
    /// A parent link points outside the arena, or the chain is longer than
    /// the arena (a cycle).
    DanglingParent { node_id: u64 },
    Map(MapError),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingResult { termination } => {
                write!(f, "no path to reconstruct ({termination})")
            }
            Self::DanglingParent { node_id } => {
                write!(f, "broken parent chain at node {node_id}")
            }
            Self::Map(e) => write!(f, "map error during path marking: {e}"),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Map(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MapError> for PathError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

/// Collect node ids along the parent chain, goal first, start last.
///
/// # Errors
///
/// Returns [`PathError::DanglingParent`] if a link is missing from the arena
/// or the chain does not terminate within `arena.len()` steps.
pub fn reconstruct_path(arena: &NodeArena, goal_id: u64) -> Result<Vec<u64>, PathError> {
    let mut chain = Vec::new();
    let mut cursor = Some(goal_id);
    while let Some(node_id) = cursor {
        if chain.len() >= arena.len() {
            return Err(PathError::DanglingParent { node_id });
        }
        let node = arena
            .get(node_id)
            .ok_or(PathError::DanglingParent { node_id })?;
        chain.push(node_id);
        cursor = node.parent_id();
    }
    Ok(chain)
}

/// Walk the goal's parent chain, mark every cell strictly between goal and
/// start with `marker`, then ask the map to render.
///
/// The goal cell and the start cell (the node with no parent) are left
/// unmarked.
///
/// # Errors
///
/// Returns [`PathError::MissingResult`] without touching the map if the
/// search failed, [`PathError::DanglingParent`] for a corrupt chain, and
/// [`PathError::Map`] if marking or rendering fails.
pub fn reconstruct_and_mark(
    result: &SearchResult,
    map: &mut dyn MapProviderV1,
    marker: i64,
) -> Result<PathV1, PathError> {
    let goal_id = match &result.outcome {
        SearchOutcomeV1::Succeeded { goal_node_id } => *goal_node_id,
        SearchOutcomeV1::Failed { reason } => {
            return Err(PathError::MissingResult {
                termination: reason.clone(),
            })
        }
    };

    let chain = reconstruct_path(&result.nodes, goal_id)?;
    let mut positions = Vec::with_capacity(chain.len());
    for &node_id in &chain {
        let node = result
            .nodes
            .get(node_id)
            .ok_or(PathError::DanglingParent { node_id })?;
        positions.push(node.position());
    }

    // Drop the goal at the front and the start at the back.
    let interior = positions
        .get(1..positions.len().saturating_sub(1))
        .unwrap_or_default();
    let mut marked = Vec::with_capacity(interior.len());
    for &position in interior {
        map.mark_path_cell(position, marker)?;
        marked.push(position);
    }
    map.render()?;

    let total_cost = result.total_cost().unwrap_or_default();
    positions.reverse();
    debug!(
        cells = positions.len(),
        marked = marked.len(),
        total_cost,
        "path reconstructed"
    );

    Ok(PathV1 {
        cells: positions,
        total_cost,
        marked,
        marker,
    })
}
