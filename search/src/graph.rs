//! `SearchGraphV1`: expansion audit log.
//!
//! The normative decision surface is the ordered list of `ExpandEventV1`
//! entries. Node summaries are a derived index of the final arena state.

use gridwalk_kernel::grid::{Direction, Position};
use gridwalk_kernel::proof::canon::{canonical_json_bytes, CanonError};

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraphV1 {
    /// Ordered expansion events, one per frontier pop.
    pub expansions: Vec<ExpandEventV1>,
    /// Final node states sorted by `node_id` ascending.
    pub node_summaries: Vec<NodeSummaryV1>,
    pub metadata: SearchGraphMetadata,
}

/// A single frontier pop and its successor handling.
#[derive(Debug, Clone)]
pub struct ExpandEventV1 {
    /// Total order of frontier pops.
    pub expansion_order: u64,
    pub node_id: u64,
    pub position: Position,
    /// The frontier key at time of pop.
    pub pop_key: PopKeyV1,
    /// `g_cost` at time of pop.
    pub g_cost: i64,
    /// One record per cardinal direction, in enumeration order. Empty for
    /// the goal pop.
    pub candidates: Vec<CandidateRecordV1>,
}

/// The frontier ordering key recorded at pop time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopKeyV1 {
    pub f_cost: i64,
    pub insertion_order: u64,
}

#[derive(Debug, Clone)]
pub struct CandidateRecordV1 {
    pub direction: Direction,
    pub position: Position,
    pub outcome: CandidateOutcomeV1,
}

/// What happened to one neighbor during an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcomeV1 {
    /// First time this position was seen; inserted into the open set.
    Discovered { node_id: u64 },
    /// Already tracked and strictly improved through the expanding node.
    /// `propagated` lists descendants corrected afterwards (closed only).
    Improved {
        node_id: u64,
        previous_g: i64,
        new_g: i64,
        was_closed: bool,
        propagated: Vec<u64>,
    },
    /// Already tracked at an equal or better cost.
    Unchanged { node_id: u64 },
    OutOfBounds,
    Impassable { cost: i64 },
}

/// Derived node summary.
#[derive(Debug, Clone)]
pub struct NodeSummaryV1 {
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub position: Position,
    pub g_cost: i64,
    pub h_cost: i64,
    pub f_cost: i64,
    /// `"open"`, `"closed"`, or `"untracked"`.
    pub membership: &'static str,
    pub is_goal: bool,
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    pub map_id: String,
    pub start: Position,
    pub goal: Position,

    // Counters
    pub total_expansions: u64,
    pub total_discovered: u64,
    pub total_improvements: u64,
    pub total_propagation_updates: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReasonV1,
}

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// The goal was popped from the open set.
    GoalReached { node_id: u64 },
    /// The open set emptied without reaching the goal.
    FrontierExhausted,
    /// `max_expansions` was hit.
    ExpansionBudgetExceeded,
    /// An open/closed invariant check failed.
    FrontierInvariantViolation { detail: String },
}

impl TerminationReasonV1 {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::FrontierInvariantViolation { .. } => "frontier_invariant_violation",
        }
    }
}

impl std::fmt::Display for TerminationReasonV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalReached { node_id } => write!(f, "goal reached at node {node_id}"),
            Self::FrontierExhausted => write!(f, "no path found: frontier exhausted"),
            Self::ExpansionBudgetExceeded => write!(f, "expansion budget exceeded"),
            Self::FrontierInvariantViolation { detail } => {
                write!(f, "frontier invariant violated: {detail}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraphV1 {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    #[must_use]
    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

/// `{"col": c, "row": r}`.
#[must_use]
pub fn position_to_json(p: Position) -> serde_json::Value {
    serde_json::json!({"col": p.col, "row": p.row})
}

fn expand_event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "candidates": e.candidates.iter().map(candidate_to_json).collect::<Vec<_>>(),
        "expansion_order": e.expansion_order,
        "g_cost": e.g_cost,
        "node_id": e.node_id,
        "pop_key": {
            "f_cost": e.pop_key.f_cost,
            "insertion_order": e.pop_key.insertion_order,
        },
        "position": position_to_json(e.position),
    })
}

fn candidate_to_json(c: &CandidateRecordV1) -> serde_json::Value {
    serde_json::json!({
        "direction": c.direction.as_str(),
        "outcome": outcome_to_json(&c.outcome),
        "position": position_to_json(c.position),
    })
}

fn outcome_to_json(o: &CandidateOutcomeV1) -> serde_json::Value {
    match o {
        CandidateOutcomeV1::Discovered { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "discovered"})
        }
        CandidateOutcomeV1::Improved {
            node_id,
            previous_g,
            new_g,
            was_closed,
            propagated,
        } => serde_json::json!({
            "new_g": new_g,
            "node_id": node_id,
            "previous_g": previous_g,
            "propagated": propagated,
            "type": "improved",
            "was_closed": was_closed,
        }),
        CandidateOutcomeV1::Unchanged { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "unchanged"})
        }
        CandidateOutcomeV1::OutOfBounds => serde_json::json!({"type": "out_of_bounds"}),
        CandidateOutcomeV1::Impassable { cost } => {
            serde_json::json!({"cost": cost, "type": "impassable"})
        }
    }
}

fn node_summary_to_json(n: &NodeSummaryV1) -> serde_json::Value {
    serde_json::json!({
        "f_cost": n.f_cost,
        "g_cost": n.g_cost,
        "h_cost": n.h_cost,
        "is_goal": n.is_goal,
        "membership": n.membership,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
        "position": position_to_json(n.position),
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "frontier_high_water": m.frontier_high_water,
        "goal": position_to_json(m.goal),
        "map_id": m.map_id,
        "start": position_to_json(m.start),
        "termination_reason": termination_reason_to_json(&m.termination_reason),
        "total_discovered": m.total_discovered,
        "total_expansions": m.total_expansions,
        "total_improvements": m.total_improvements,
        "total_propagation_updates": m.total_propagation_updates,
    })
}

fn termination_reason_to_json(r: &TerminationReasonV1) -> serde_json::Value {
    match r {
        TerminationReasonV1::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": r.as_str()})
        }
        TerminationReasonV1::FrontierInvariantViolation { detail } => {
            serde_json::json!({"detail": detail, "type": r.as_str()})
        }
        TerminationReasonV1::FrontierExhausted | TerminationReasonV1::ExpansionBudgetExceeded => {
            serde_json::json!({"type": r.as_str()})
        }
    }
}
