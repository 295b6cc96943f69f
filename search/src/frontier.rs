//! Open/closed frontier manager.
//!
//! Membership is one `BTreeMap<node_id, Membership>`, so a node is open,
//! closed, or absent, never two of those at once. The open set is ordered by a
//! `BinaryHeap` of [`FrontierKey`]s with lazy deletion: when an open node's
//! cost drops it is pushed again with a fresh insertion stamp, and the older
//! heap entry is recognised as stale on pop because its stamp no longer
//! matches the node's.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use crate::node::{FrontierKey, GridNodeV1, NodeArena};

/// Which collection a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Open,
    Closed,
}

impl Membership {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Result of [`OpenClosedFrontier::resolve`].
#[derive(Debug, Clone)]
pub enum Resolved {
    /// A node with the candidate's position is already open or closed.
    /// Later updates must target this canonical instance.
    Existing { node_id: u64, membership: Membership },
    /// No node with this position is tracked; the candidate is returned as-is.
    Candidate(GridNodeV1),
}

/// A heap entry. `BinaryHeap` is a max-heap, so the key is wrapped in
/// `Reverse` to pop the best key first.
#[derive(Debug, PartialEq, Eq)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node_id: u64,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key
            .cmp(&other.key)
            .then(other.node_id.cmp(&self.node_id))
    }
}

/// Description of a broken frontier invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierInvariantViolation {
    pub detail: String,
}

/// Best-first open/closed frontier.
#[derive(Debug, Default)]
pub struct OpenClosedFrontier {
    heap: BinaryHeap<FrontierEntry>,
    membership: BTreeMap<u64, Membership>,
    open_count: usize,
    next_insertion: u64,
    high_water: u64,
    stale_skipped: u64,
}

impl OpenClosedFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a freshly generated candidate onto the canonical node for its
    /// position, if the frontier already tracks one.
    ///
    /// Must be called before deciding whether to insert, so that no position
    /// is ever tracked twice.
    #[must_use]
    pub fn resolve(&self, arena: &NodeArena, candidate: GridNodeV1) -> Resolved {
        let tracked = arena.lookup(candidate.position()).and_then(|node_id| {
            self.membership
                .get(&node_id)
                .map(|&membership| (node_id, membership))
        });
        match tracked {
            Some((node_id, membership)) => Resolved::Existing {
                node_id,
                membership,
            },
            None => Resolved::Candidate(candidate),
        }
    }

    /// Add `node_id` to the open set, stamping it with the next insertion
    /// order.
    ///
    /// Returns `false` (and changes nothing) if the node is already open or
    /// closed, or is not in the arena.
    pub fn insert(&mut self, arena: &mut NodeArena, node_id: u64) -> bool {
        if self.membership.contains_key(&node_id) {
            return false;
        }
        if !self.push_entry(arena, node_id) {
            return false;
        }
        self.membership.insert(node_id, Membership::Open);
        self.open_count += 1;
        let size = self.open_count as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        true
    }

    /// Re-file an open node after its `f_cost` changed.
    ///
    /// The node receives a fresh insertion stamp, so among equal `f_cost`
    /// entries it now counts as the most recent. Returns `false` if the node
    /// is not open.
    pub fn reprioritize(&mut self, arena: &mut NodeArena, node_id: u64) -> bool {
        if self.membership.get(&node_id) != Some(&Membership::Open) {
            return false;
        }
        self.push_entry(arena, node_id)
    }

    fn push_entry(&mut self, arena: &mut NodeArena, node_id: u64) -> bool {
        let stamp = self.next_insertion;
        let Some(node) = arena.get_mut(node_id) else {
            return false;
        };
        node.insertion_order = stamp;
        self.next_insertion += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(&*node)),
            node_id,
        });
        true
    }

    /// Remove and return the open node with the lowest `f_cost`
    /// (most recent insertion on ties).
    ///
    /// The node stays tracked as open until [`Self::close`] is called.
    /// Callers close it immediately; the split exists so the driver owns the
    /// open→closed transition.
    pub fn pop_min(&mut self, arena: &NodeArena) -> Option<u64> {
        while let Some(entry) = self.heap.pop() {
            let live = self.membership.get(&entry.node_id) == Some(&Membership::Open)
                && arena
                    .get(entry.node_id)
                    .is_some_and(|n| n.insertion_order == entry.key.0.insertion_order);
            if live {
                return Some(entry.node_id);
            }
            self.stale_skipped += 1;
        }
        None
    }

    /// Move an open node to the closed set.
    ///
    /// Returns `false` if the node was not open.
    pub fn close(&mut self, node_id: u64) -> bool {
        match self.membership.get_mut(&node_id) {
            Some(m) if *m == Membership::Open => {
                *m = Membership::Closed;
                self.open_count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Membership test. Node ids are one-to-one with positions, so this is
    /// membership by position.
    #[must_use]
    pub fn is_member(&self, node_id: u64, collection: Membership) -> bool {
        self.membership.get(&node_id) == Some(&collection)
    }

    #[must_use]
    pub fn membership(&self, node_id: u64) -> Option<Membership> {
        self.membership.get(&node_id).copied()
    }

    #[must_use]
    pub fn open_len(&self) -> usize {
        self.open_count
    }

    #[must_use]
    pub fn closed_len(&self) -> usize {
        self.membership.len() - self.open_count
    }

    #[must_use]
    pub fn is_open_empty(&self) -> bool {
        self.open_count == 0
    }

    /// High-water mark of the open set size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Heap entries discarded as stale or closed during pops.
    #[must_use]
    pub fn stale_skipped(&self) -> u64 {
        self.stale_skipped
    }

    /// Verify the open/closed invariants against the arena.
    ///
    /// Checks that every tracked position is tracked exactly once across
    /// open ∪ closed, that the open count matches the membership map, and
    /// that every open node has a live heap entry.
    ///
    /// # Errors
    ///
    /// Returns [`FrontierInvariantViolation`] describing the first failure.
    pub fn check_invariants(&self, arena: &NodeArena) -> Result<(), FrontierInvariantViolation> {
        let mut positions = BTreeSet::new();
        let mut open_seen = 0usize;
        for (&node_id, &membership) in &self.membership {
            let Some(node) = arena.get(node_id) else {
                return Err(FrontierInvariantViolation {
                    detail: format!("tracked node {node_id} missing from arena"),
                });
            };
            if !positions.insert(node.position()) {
                return Err(FrontierInvariantViolation {
                    detail: format!(
                        "position {} tracked more than once (node {node_id} is {})",
                        node.position(),
                        membership.as_str()
                    ),
                });
            }
            if membership == Membership::Open {
                open_seen += 1;
            }
        }
        if open_seen != self.open_count {
            return Err(FrontierInvariantViolation {
                detail: format!(
                    "open count {} disagrees with membership map ({open_seen})",
                    self.open_count
                ),
            });
        }
        let live: BTreeSet<u64> = self
            .heap
            .iter()
            .filter(|e| {
                arena
                    .get(e.node_id)
                    .is_some_and(|n| n.insertion_order == e.key.0.insertion_order)
            })
            .map(|e| e.node_id)
            .collect();
        for (&node_id, &membership) in &self.membership {
            if membership == Membership::Open && !live.contains(&node_id) {
                return Err(FrontierInvariantViolation {
                    detail: format!("open node {node_id} has no live heap entry"),
                });
            }
        }
        Ok(())
    }
}
