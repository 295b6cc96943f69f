//! Obstacle-free uniform-cost grids.

use gridwalk_kernel::grid::Position;

use crate::grid_map::{CostGridV1, GridError};

/// 3×3, every cell costs 1, corner to corner. Optimal cost is 4 over 5
/// cells.
///
/// # Errors
///
/// Never fails for these fixed dimensions; the `Result` mirrors
/// [`CostGridV1::new`].
pub fn open_3x3() -> Result<CostGridV1, GridError> {
    open_field(3)
}

/// `n`×`n` uniform grid, start top-left, goal bottom-right.
///
/// # Errors
///
/// Returns [`GridError::Empty`] for `n == 0`.
pub fn open_field(n: usize) -> Result<CostGridV1, GridError> {
    let last = i64::try_from(n.saturating_sub(1)).unwrap_or(0);
    CostGridV1::new(
        format!("open_field_{n}"),
        n,
        n,
        vec![1; n * n],
        Position::new(0, 0),
        Position::new(last, last),
    )
}
