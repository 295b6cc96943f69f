//! Search entry point and expansion loop.

use gridwalk_kernel::grid::Position;
use tracing::{debug, trace};

use crate::contract::MapProviderV1;
use crate::cost::{attach_and_eval, propagate};
use crate::error::SearchError;
use crate::frontier::{Membership, OpenClosedFrontier, Resolved};
use crate::graph::{
    CandidateOutcomeV1, CandidateRecordV1, ExpandEventV1, NodeSummaryV1, PopKeyV1,
    SearchGraphMetadata, SearchGraphV1, TerminationReasonV1,
};
use crate::node::{GridNodeV1, NodeArena};
use crate::policy::SearchPolicyV1;
use crate::successor::{scan_neighbors, NeighborV1};

/// Terminal state of a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcomeV1 {
    Succeeded { goal_node_id: u64 },
    /// No path: carries why the loop stopped.
    Failed { reason: TerminationReasonV1 },
}

/// Result of a search execution.
///
/// Always contains the full node arena and a complete `SearchGraphV1`,
/// whatever the outcome.
#[derive(Debug)]
pub struct SearchResult {
    pub outcome: SearchOutcomeV1,
    /// Every node created during the run, indexed by id.
    pub nodes: NodeArena,
    pub graph: SearchGraphV1,
}

impl SearchResult {
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.outcome, SearchOutcomeV1::Succeeded { .. })
    }

    #[must_use]
    pub fn goal_node_id(&self) -> Option<u64> {
        match self.outcome {
            SearchOutcomeV1::Succeeded { goal_node_id } => Some(goal_node_id),
            SearchOutcomeV1::Failed { .. } => None,
        }
    }

    /// The goal node, if the search succeeded.
    #[must_use]
    pub fn goal_node(&self) -> Option<&GridNodeV1> {
        self.goal_node_id().and_then(|id| self.nodes.get(id))
    }

    /// Total path cost (`g` of the goal), if the search succeeded.
    #[must_use]
    pub fn total_cost(&self) -> Option<i64> {
        self.goal_node().map(GridNodeV1::g_cost)
    }
}

#[derive(Debug, Default)]
struct Counters {
    discovered: u64,
    improvements: u64,
    propagation_updates: u64,
}

/// Run best-first search from the map's start to its goal.
///
/// Each iteration pops the open node with the lowest `f_cost` (most recent
/// insertion on ties), closes it, and stops if it is the goal. Otherwise
/// each passable neighbor is resolved against the open and closed sets:
///
/// - untracked: attached to the current node, inserted into open, and
///   recorded as a child of the current node;
/// - tracked and strictly cheaper through the current node: re-attached; an
///   open node is re-filed in the heap, a closed node stays closed and its
///   recorded descendants are corrected by [`propagate`];
/// - otherwise left alone.
///
/// Running out of open nodes is not an error: it yields
/// [`SearchOutcomeV1::Failed`] with the audit trail intact.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for policy validation failures and
/// [`SearchError::Map`] if the start or goal is out of bounds or the map
/// breaks its contract mid-run.
pub fn search(
    map: &dyn MapProviderV1,
    policy: &SearchPolicyV1,
) -> Result<SearchResult, SearchError> {
    policy.validate()?;

    let start = map.start_position();
    let goal = map.goal_position();
    map.cost(start)?;
    map.cost(goal)?;
    debug!(map_id = map.map_id(), %start, %goal, "search started");

    let mut arena = NodeArena::new();
    let mut frontier = OpenClosedFrontier::new();
    let mut expansions: Vec<ExpandEventV1> = Vec::new();
    let mut counters = Counters::default();

    let root = arena.allot(GridNodeV1::new(start));
    frontier.insert(&mut arena, root);

    let termination_reason = loop {
        if policy.check_frontier_invariants {
            if let Err(violation) = frontier.check_invariants(&arena) {
                break TerminationReasonV1::FrontierInvariantViolation {
                    detail: violation.detail,
                };
            }
        }

        if frontier.is_open_empty() {
            break TerminationReasonV1::FrontierExhausted;
        }

        if policy
            .max_expansions
            .is_some_and(|cap| expansions.len() as u64 >= cap)
        {
            break TerminationReasonV1::ExpansionBudgetExceeded;
        }

        // Open set was checked non-empty above.
        let Some(current) = frontier.pop_min(&arena) else {
            break TerminationReasonV1::FrontierInvariantViolation {
                detail: "pop from non-empty open set returned nothing".into(),
            };
        };
        frontier.close(current);

        let node = arena.get(current).ok_or(SearchError::UnknownNode {
            node_id: current,
        })?;
        let position = node.position();
        let current_g = node.g_cost();
        let pop_key = PopKeyV1 {
            f_cost: node.f_cost(),
            insertion_order: node.insertion_order(),
        };
        let expansion_order = expansions.len() as u64;
        trace!(expansion_order, node_id = current, %position, f_cost = pop_key.f_cost, "expand");

        if position == goal {
            expansions.push(ExpandEventV1 {
                expansion_order,
                node_id: current,
                position,
                pop_key,
                g_cost: current_g,
                candidates: Vec::new(),
            });
            break TerminationReasonV1::GoalReached { node_id: current };
        }

        let mut candidates = Vec::with_capacity(4);
        for (direction, neighbor) in scan_neighbors(position, map)? {
            let (neighbor_position, outcome) = match neighbor {
                NeighborV1::OutOfBounds(p) => (p, CandidateOutcomeV1::OutOfBounds),
                NeighborV1::Impassable { position, cost } => {
                    (position, CandidateOutcomeV1::Impassable { cost })
                }
                NeighborV1::Passable(successor) => {
                    let p = successor.position();
                    let outcome = expand_successor(
                        &mut arena,
                        &mut frontier,
                        &mut counters,
                        current,
                        current_g,
                        successor,
                        map,
                    )?;
                    (p, outcome)
                }
            };
            candidates.push(CandidateRecordV1 {
                direction,
                position: neighbor_position,
                outcome,
            });
        }

        expansions.push(ExpandEventV1 {
            expansion_order,
            node_id: current,
            position,
            pop_key,
            g_cost: current_g,
            candidates,
        });
    };

    let outcome = match &termination_reason {
        TerminationReasonV1::GoalReached { node_id } => SearchOutcomeV1::Succeeded {
            goal_node_id: *node_id,
        },
        other => SearchOutcomeV1::Failed {
            reason: other.clone(),
        },
    };
    debug!(
        termination = termination_reason.as_str(),
        expansions = expansions.len(),
        nodes = arena.len(),
        "search finished"
    );

    let graph = build_graph(
        expansions,
        &arena,
        &frontier,
        &counters,
        termination_reason,
        map.map_id(),
        start,
        goal,
    );

    Ok(SearchResult {
        outcome,
        nodes: arena,
        graph,
    })
}

/// Resolve one passable successor against the frontier and apply the
/// discover / improve / unchanged rule.
fn expand_successor(
    arena: &mut NodeArena,
    frontier: &mut OpenClosedFrontier,
    counters: &mut Counters,
    current: u64,
    current_g: i64,
    successor: GridNodeV1,
    map: &dyn MapProviderV1,
) -> Result<CandidateOutcomeV1, SearchError> {
    match frontier.resolve(arena, successor) {
        Resolved::Candidate(fresh) => {
            let node_id = arena.allot(fresh);
            attach_and_eval(arena, node_id, current, map)?;
            frontier.insert(arena, node_id);
            arena.register_child(current, node_id);
            counters.discovered += 1;
            Ok(CandidateOutcomeV1::Discovered { node_id })
        }
        Resolved::Existing {
            node_id,
            membership,
        } => {
            let existing = arena
                .get(node_id)
                .ok_or(SearchError::UnknownNode { node_id })?;
            let via = current_g.saturating_add(map.cost(existing.position())?);
            if via >= existing.g_cost() {
                return Ok(CandidateOutcomeV1::Unchanged { node_id });
            }

            let update = attach_and_eval(arena, node_id, current, map)?;
            counters.improvements += 1;
            let propagated = match membership {
                Membership::Open => {
                    frontier.reprioritize(arena, node_id);
                    Vec::new()
                }
                Membership::Closed => {
                    let updated = propagate(arena, node_id, map)?;
                    for &id in &updated {
                        frontier.reprioritize(arena, id);
                    }
                    counters.propagation_updates += updated.len() as u64;
                    updated
                }
            };
            trace!(
                node_id,
                previous_g = update.previous_g,
                new_g = update.new_g,
                propagated = propagated.len(),
                "improved tracked node"
            );
            Ok(CandidateOutcomeV1::Improved {
                node_id,
                previous_g: update.previous_g,
                new_g: update.new_g,
                was_closed: membership == Membership::Closed,
                propagated,
            })
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_graph(
    expansions: Vec<ExpandEventV1>,
    arena: &NodeArena,
    frontier: &OpenClosedFrontier,
    counters: &Counters,
    termination_reason: TerminationReasonV1,
    map_id: &str,
    start: Position,
    goal: Position,
) -> SearchGraphV1 {
    let goal_id = match &termination_reason {
        TerminationReasonV1::GoalReached { node_id } => Some(*node_id),
        _ => None,
    };
    // Arena iteration is already in id order.
    let node_summaries = arena
        .iter()
        .map(|(node_id, n)| NodeSummaryV1 {
            node_id,
            parent_id: n.parent_id(),
            position: n.position(),
            g_cost: n.g_cost(),
            h_cost: n.h_cost(),
            f_cost: n.f_cost(),
            membership: frontier
                .membership(node_id)
                .map_or("untracked", Membership::as_str),
            is_goal: goal_id == Some(node_id),
        })
        .collect();

    SearchGraphV1 {
        metadata: SearchGraphMetadata {
            map_id: map_id.to_string(),
            start,
            goal,
            total_expansions: expansions.len() as u64,
            total_discovered: counters.discovered,
            total_improvements: counters.improvements,
            total_propagation_updates: counters.propagation_updates,
            frontier_high_water: frontier.high_water(),
            termination_reason,
        },
        expansions,
        node_summaries,
    }
}
