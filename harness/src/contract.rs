//! Harness-side extension of the map provider contract.
//!
//! The search core only needs [`MapProviderV1`]. The runner additionally
//! needs a canonical snapshot of the map before search (for the report) and
//! the most recent rendered frame (observational artifact).

use gridwalk_search::contract::MapProviderV1;

/// A map the runner can package into a report.
pub trait ReportableMapV1: MapProviderV1 {
    /// Canonical-JSON-ready description of the map's current state.
    ///
    /// Must contain integers only (no floats) so it passes the kernel
    /// canonicalizer.
    fn snapshot_json(&self) -> serde_json::Value;

    /// The most recent frame produced by `render`, if any.
    fn last_frame(&self) -> Option<&str>;
}
