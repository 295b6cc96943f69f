//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures and map contract breaches only.
//! Running out of frontier is not an error: it is
//! [`crate::search::SearchOutcomeV1::Failed`] and always comes with a
//! complete [`crate::graph::SearchGraphV1`].

use crate::contract::MapError;

/// Typed failure for search validation and map access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy failed validation. No search steps were taken.
    InvalidPolicy { detail: String },
    /// The map provider failed where it must not (e.g. start or goal out of
    /// bounds, or a cost lookup failing for a cell already known to exist).
    Map(MapError),
    /// A node id was used that the arena never allotted.
    UnknownNode { node_id: u64 },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::Map(e) => write!(f, "map provider error: {e}"),
            Self::UnknownNode { node_id } => write!(f, "node {node_id} is not in the arena"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Map(e) => Some(e),
            Self::InvalidPolicy { .. } | Self::UnknownNode { .. } => None,
        }
    }
}

impl From<MapError> for SearchError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}
