//! A map where the fewest-hops route is not the cheapest.

use gridwalk_kernel::grid::Position;

use crate::grid_map::{CostGridV1, GridError};

/// ```text
/// S 9 G
/// 1 1 1
/// ```
///
/// Straight across costs 10; around the bottom row costs 4.
///
/// # Errors
///
/// Never fails; see [`CostGridV1::from_rows`].
pub fn costly_direct() -> Result<CostGridV1, GridError> {
    CostGridV1::from_rows(
        "costly_direct",
        &[&[1, 9, 1], &[1, 1, 1]],
        Position::new(0, 0),
        Position::new(0, 2),
    )
}
