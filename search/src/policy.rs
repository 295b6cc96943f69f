//! Search policy types.

use crate::error::SearchError;

/// Marker written into path cells by default.
pub const DEFAULT_PATH_MARKER: i64 = 5;

/// Search configuration, validated before any search step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Value written into each intermediate path cell on reconstruction.
    /// Must be non-negative so marked cells stay passable.
    pub path_marker: i64,
    /// Hard cap on node expansions. `None` runs until the goal is reached or
    /// the frontier is exhausted.
    pub max_expansions: Option<u64>,
    /// Verify open/closed disjointness and position uniqueness at every
    /// iteration boundary. Costs a full pass over the frontier per step.
    pub check_frontier_invariants: bool,
}

impl SearchPolicyV1 {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `path_marker` is negative or
    /// `max_expansions` is `Some(0)`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.path_marker < 0 {
            return Err(SearchError::InvalidPolicy {
                detail: format!(
                    "path_marker {} would make path cells impassable",
                    self.path_marker
                ),
            });
        }
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions of 0 cannot expand the start node".into(),
            });
        }
        Ok(())
    }

    /// Canonical JSON form, used for the policy snapshot digest.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "check_frontier_invariants": self.check_frontier_invariants,
            "max_expansions": self.max_expansions,
            "path_marker": self.path_marker,
        })
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            path_marker: DEFAULT_PATH_MARKER,
            max_expansions: None,
            check_frontier_invariants: false,
        }
    }
}
