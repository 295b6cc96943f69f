//! Maps with impassable cells.

use gridwalk_kernel::grid::Position;

use crate::grid_map::{CostGridV1, GridError};

/// Goal boxed in by walls; no route exists.
///
/// ```text
/// S 1 1
/// 1 # #
/// 1 # G
/// ```
///
/// # Errors
///
/// Never fails; see [`CostGridV1::from_rows`].
pub fn isolated_goal() -> Result<CostGridV1, GridError> {
    CostGridV1::from_rows(
        "isolated_goal",
        &[&[1, 1, 1], &[1, -1, -1], &[1, -1, 1]],
        Position::new(0, 0),
        Position::new(2, 2),
    )
}

/// Serpentine corridor: every odd row is a wall with a single gap that
/// alternates between the right and left edge. Start top-left, goal at the
/// bottom-left corner.
///
/// # Errors
///
/// Returns [`GridError::Empty`] if either dimension is zero.
pub fn walled_corridor(width: usize, height: usize) -> Result<CostGridV1, GridError> {
    let mut cells = vec![1; width * height];
    for row in (1..height).step_by(2) {
        let gap = if row % 4 == 1 { width.saturating_sub(1) } else { 0 };
        for col in 0..width {
            if col != gap {
                cells[row * width + col] = -1;
            }
        }
    }
    let last_row = i64::try_from(height.saturating_sub(1)).unwrap_or(0);
    CostGridV1::new(
        format!("walled_corridor_{width}x{height}"),
        width,
        height,
        cells,
        Position::new(0, 0),
        Position::new(last_row, 0),
    )
}
