//! Fixture maps used by tests, benches and the fixture binary.

pub mod detour;
pub mod open_field;
pub mod rediscovery;
pub mod walled;

use crate::grid_map::{CostGridV1, GridError};

/// Names accepted by [`fixture_by_name`].
pub const FIXTURE_NAMES: &[&str] = &[
    "open_3x3",
    "isolated_goal",
    "costly_direct",
    "closed_improvement",
    "open_field_16",
    "walled_corridor_15",
];

/// Build a named fixture. Returns `None` for unknown names.
#[must_use]
pub fn fixture_by_name(name: &str) -> Option<Result<CostGridV1, GridError>> {
    let built = match name {
        "open_3x3" => open_field::open_3x3(),
        "isolated_goal" => walled::isolated_goal(),
        "costly_direct" => detour::costly_direct(),
        "closed_improvement" => rediscovery::closed_improvement(),
        "open_field_16" => open_field::open_field(16),
        "walled_corridor_15" => walled::walled_corridor(15, 15),
        _ => return None,
    };
    Some(built)
}
