//! Shared helpers for gridwalk benchmark suites.

use gridwalk_harness::grid_map::CostGridV1;
use gridwalk_harness::worlds::{open_field, walled};
use gridwalk_search::policy::SearchPolicyV1;
use gridwalk_search::search::{search, SearchResult};

/// A named map plus the policy to search it with.
pub struct Regime {
    pub name: String,
    pub map: CostGridV1,
    pub policy: SearchPolicyV1,
}

/// Open uniform fields and serpentine corridors at a few sizes.
///
/// # Panics
///
/// Panics if a fixture fails to build. Bench-only helper.
#[must_use]
pub fn grid_regimes() -> Vec<Regime> {
    let mut regimes = Vec::new();
    for n in [16, 64, 128] {
        regimes.push(Regime {
            name: format!("open_{n}"),
            map: open_field::open_field(n).expect("open field builds"),
            policy: SearchPolicyV1::default(),
        });
    }
    for n in [15, 63] {
        regimes.push(Regime {
            name: format!("corridor_{n}"),
            map: walled::walled_corridor(n, n).expect("corridor builds"),
            policy: SearchPolicyV1::default(),
        });
    }
    regimes
}

/// `search()` only: no marking, rendering or report assembly.
///
/// # Panics
///
/// Panics on a search error. Bench-only helper.
#[must_use]
pub fn search_only(regime: &Regime) -> SearchResult {
    search(&regime.map, &regime.policy).expect("search succeeds")
}
