//! Map provider contract.

use gridwalk_kernel::grid::Position;

/// Failure reported by a map provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The position lies outside the grid.
    OutOfBounds { position: Position },
    /// The provider could not produce its rendered output.
    RenderFailed { detail: String },
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { position } => write!(f, "position {position} is out of bounds"),
            Self::RenderFailed { detail } => write!(f, "render failed: {detail}"),
        }
    }
}

impl std::error::Error for MapError {}

/// Trait for weighted grid maps that support search.
///
/// # Contract
///
/// - `cost` returns the traversal cost of entering a cell. A negative value
///   marks the cell impassable. Out-of-range positions return
///   [`MapError::OutOfBounds`].
/// - Costs of passable cells are expected to be at least 1; the Manhattan
///   heuristic is only consistent under that assumption.
/// - `start_position` and `goal_position` are fixed for the lifetime of a
///   search run.
/// - The map must not be mutated by anyone else while a search reads it.
pub trait MapProviderV1 {
    /// Stable identifier recorded in audit metadata.
    fn map_id(&self) -> &str;

    /// Traversal cost of the cell at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if `position` is outside the grid.
    fn cost(&self, position: Position) -> Result<i64, MapError>;

    fn start_position(&self) -> Position;

    fn goal_position(&self) -> Position;

    /// Flag a cell as part of the solution path.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if `position` is outside the grid.
    fn mark_path_cell(&mut self, position: Position, marker: i64) -> Result<(), MapError>;

    /// Produce the provider's visual representation of the current state.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::RenderFailed`] if the output cannot be produced.
    fn render(&mut self) -> Result<(), MapError>;
}
