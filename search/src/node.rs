//! Search node records and the position-keyed node arena.
//!
//! Parent and child links are arena indices, never owning references.
//! Re-parenting a node is an index reassignment.
//!
//! Cost fields are crate-private. Outside the arena's own bookkeeping, only
//! [`crate::cost::attach_and_eval`] and [`crate::cost::propagate`] write them,
//! which keeps `f = g + h` true at every observation point.

use std::collections::BTreeMap;
use std::fmt;

use gridwalk_kernel::grid::Position;

/// A search-tree node for one grid cell.
///
/// Equality is by position only: two records for the same cell are the same
/// node for open/closed membership, whatever their costs.
#[derive(Debug, Clone)]
pub struct GridNodeV1 {
    position: Position,
    pub(crate) g_cost: i64,
    pub(crate) h_cost: i64,
    pub(crate) parent_id: Option<u64>,
    /// Nodes first discovered while expanding this one. Used only to push
    /// cost improvements downstream; not a statement of current parentage.
    pub(crate) children: Vec<u64>,
    /// Stamp of the most recent frontier insertion (tie-break key).
    pub(crate) insertion_order: u64,
}

impl GridNodeV1 {
    /// A fresh node with zero costs and no parent.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            g_cost: 0,
            h_cost: 0,
            parent_id: None,
            children: Vec::new(),
            insertion_order: 0,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Accumulated path cost from the start.
    #[must_use]
    pub fn g_cost(&self) -> i64 {
        self.g_cost
    }

    /// Heuristic estimate to the goal.
    #[must_use]
    pub fn h_cost(&self) -> i64 {
        self.h_cost
    }

    /// `g + h`. Always derived, never stored.
    #[must_use]
    pub fn f_cost(&self) -> i64 {
        self.g_cost.saturating_add(self.h_cost)
    }

    #[must_use]
    pub fn parent_id(&self) -> Option<u64> {
        self.parent_id
    }

    #[must_use]
    pub fn children(&self) -> &[u64] {
        &self.children
    }

    #[must_use]
    pub fn insertion_order(&self) -> u64 {
        self.insertion_order
    }
}

impl PartialEq for GridNodeV1 {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for GridNodeV1 {}

impl fmt::Display for GridNodeV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row: {}, col: {}, cost: {}",
            self.position.row,
            self.position.col,
            self.f_cost()
        )
    }
}

/// Owner of every node created during one search run.
///
/// At most one node exists per position. Node ids are dense indices in
/// allotment order, so the root is always id 0.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<GridNodeV1>,
    by_position: BTreeMap<Position, u64>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id of the node at `position`, if one has been allotted.
    #[must_use]
    pub fn lookup(&self, position: Position) -> Option<u64> {
        self.by_position.get(&position).copied()
    }

    #[must_use]
    pub fn get(&self, node_id: u64) -> Option<&GridNodeV1> {
        usize::try_from(node_id)
            .ok()
            .and_then(|idx| self.nodes.get(idx))
    }

    pub(crate) fn get_mut(&mut self, node_id: u64) -> Option<&mut GridNodeV1> {
        usize::try_from(node_id)
            .ok()
            .and_then(|idx| self.nodes.get_mut(idx))
    }

    /// Take ownership of `node` and return its id.
    ///
    /// If a node already exists at the same position, `node` is dropped and
    /// the existing id is returned.
    pub fn allot(&mut self, node: GridNodeV1) -> u64 {
        if let Some(existing) = self.lookup(node.position) {
            return existing;
        }
        let node_id = self.nodes.len() as u64;
        self.by_position.insert(node.position, node_id);
        self.nodes.push(node);
        node_id
    }

    /// Record `child` as discovered from `parent`.
    ///
    /// Returns `false` if `parent` does not exist.
    pub(crate) fn register_child(&mut self, parent: u64, child: u64) -> bool {
        match self.get_mut(parent) {
            Some(node) => {
                node.children.push(child);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate `(node_id, node)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &GridNodeV1)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (idx as u64, node))
    }
}

/// The frontier ordering key: `(f_cost, insertion_order)`.
///
/// Lower `f_cost` sorts first. On an `f_cost` tie the **most recently**
/// inserted node sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f_cost: i64,
    pub insertion_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(other.insertion_order.cmp(&self.insertion_order))
    }
}

impl From<&GridNodeV1> for FrontierKey {
    fn from(node: &GridNodeV1) -> Self {
        Self {
            f_cost: node.f_cost(),
            insertion_order: node.insertion_order,
        }
    }
}
