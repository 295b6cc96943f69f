//! Harness runner: search a map, mark the path, and package a report.
//!
//! The runner owns orchestration only. Search semantics live in
//! `gridwalk_search`; hashing and canonical JSON live in `gridwalk_kernel`.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → snapshot map → search()
//!   → reconstruct_and_mark() (success) | render() (failure)
//!   → serialize artifacts → run_summary.json → build_report()
//! ```

use gridwalk_kernel::proof::canon::canonical_json_bytes;
use gridwalk_kernel::proof::hash::{canonical_hash, HashDomain};
use gridwalk_search::contract::MapError;
use gridwalk_search::error::SearchError;
use gridwalk_search::path::{no_path_json, reconstruct_and_mark, PathError, PathV1};
use gridwalk_search::policy::SearchPolicyV1;
use gridwalk_search::search::{search, SearchOutcomeV1, SearchResult};
use tracing::{debug, info_span};

use crate::contract::ReportableMapV1;
use crate::report::{build_report, ReportBuildError, SearchReportV1};

pub const SUMMARY_SCHEMA_VERSION: &str = "run_summary.v1";

/// Error during a harness run.
///
/// A search that finds no path is not an error: it produces a report whose
/// `path.json` has `"found": false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    Search(SearchError),
    Path(PathError),
    /// The map failed to render after an unsuccessful search.
    Render(MapError),
    CanonFailed { detail: String },
    Report(ReportBuildError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::Path(e) => write!(f, "path reconstruction failed: {e}"),
            Self::Render(e) => write!(f, "render failed: {e}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::Report(e) => write!(f, "report assembly failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            Self::Path(e) => Some(e),
            Self::Render(e) => Some(e),
            Self::Report(e) => Some(e),
            Self::CanonFailed { .. } => None,
        }
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<PathError> for RunError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

impl From<ReportBuildError> for RunError {
    fn from(e: ReportBuildError) -> Self {
        Self::Report(e)
    }
}

/// Everything a harness run produced.
#[derive(Debug)]
pub struct SearchRunV1 {
    pub result: SearchResult,
    /// `Some` when the goal was reached.
    pub path: Option<PathV1>,
    pub report: SearchReportV1,
}

/// Run search on `map` under `policy` and package the outputs.
///
/// On success the path cells are marked on `map` and the map is rendered
/// by path reconstruction. On failure the map is rendered unmodified so
/// the report still carries a frame.
///
/// # Errors
///
/// Returns [`RunError`] for invalid policy, map contract violations, or
/// report assembly failures.
pub fn run_search<M: ReportableMapV1>(
    map: &mut M,
    policy: &SearchPolicyV1,
) -> Result<SearchRunV1, RunError> {
    let span = info_span!("run_search", map_id = map.map_id());
    let _enter = span.enter();

    policy.validate()?;
    let map_snapshot = canon(&map.snapshot_json())?;
    let policy_snapshot = canon(&policy.to_json_value())?;

    let result = search(&*map, policy)?;

    let (path, path_value) = match &result.outcome {
        SearchOutcomeV1::Succeeded { .. } => {
            let path = reconstruct_and_mark(&result, map, policy.path_marker)?;
            let value = path.to_json_value();
            (Some(path), value)
        }
        SearchOutcomeV1::Failed { reason } => {
            map.render().map_err(RunError::Render)?;
            (None, no_path_json(reason))
        }
    };

    let search_graph = result
        .graph
        .to_canonical_json_bytes()
        .map_err(|e| RunError::CanonFailed {
            detail: e.to_string(),
        })?;
    let path_bytes = canon(&path_value)?;
    let rendered = map.last_frame().unwrap_or_default().as_bytes().to_vec();

    let outcome = match result.outcome {
        SearchOutcomeV1::Succeeded { .. } => "succeeded",
        SearchOutcomeV1::Failed { .. } => "failed",
    };
    let summary = serde_json::json!({
        "map_id": map.map_id(),
        "map_snapshot_digest": canonical_hash(HashDomain::MapSnapshot, &map_snapshot).as_str(),
        "outcome": outcome,
        "path_digest": canonical_hash(HashDomain::SearchPath, &path_bytes).as_str(),
        "policy_digest": canonical_hash(HashDomain::PolicySnapshot, &policy_snapshot).as_str(),
        "schema_version": SUMMARY_SCHEMA_VERSION,
        "search_graph_digest": canonical_hash(HashDomain::SearchGraph, &search_graph).as_str(),
        "termination_reason": result.graph.metadata.termination_reason.as_str(),
        "total_cost": result.total_cost(),
    });
    let summary_bytes = canon(&summary)?;

    let report = build_report(vec![
        ("map_snapshot.json".into(), map_snapshot, true),
        ("policy_snapshot.json".into(), policy_snapshot, true),
        ("search_graph.json".into(), search_graph, true),
        ("path.json".into(), path_bytes, true),
        ("run_summary.json".into(), summary_bytes, true),
        ("rendered_map.txt".into(), rendered, false),
    ])?;

    debug!(
        digest = report.digest.as_str(),
        found = path.is_some(),
        "report built"
    );

    Ok(SearchRunV1 {
        result,
        path,
        report,
    })
}

fn canon(value: &serde_json::Value) -> Result<Vec<u8>, RunError> {
    canonical_json_bytes(value).map_err(|e| RunError::CanonFailed {
        detail: e.to_string(),
    })
}
