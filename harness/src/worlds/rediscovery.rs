//! A map that forces a closed node to be improved.
//!
//! Zero-cost cells make the Manhattan estimate overshoot, so `(1, 2)` is
//! closed at g=3 via the bottom row before the top row reaches it at g=2.
//! The improvement must then be pushed to its open child `(1, 3)` (the
//! goal), lowering it from 8 to 7.

use gridwalk_kernel::grid::Position;

use crate::grid_map::{CostGridV1, GridError};

/// ```text
/// 0 1 0 2
/// 0 2 1 5
/// ```
///
/// Start `(0, 0)`, goal `(1, 3)`, optimal cost 7.
///
/// # Errors
///
/// Never fails; see [`CostGridV1::from_rows`].
pub fn closed_improvement() -> Result<CostGridV1, GridError> {
    CostGridV1::from_rows(
        "closed_improvement",
        &[&[0, 1, 0, 2], &[0, 2, 1, 5]],
        Position::new(0, 0),
        Position::new(1, 3),
    )
}
