//! Runs a named fixture through the harness and prints deterministic
//! key=value lines for cross-process comparison.
//!
//! Usage: `search_fixture [fixture_name]` (default: `closed_improvement`).
//! Diagnostics go to stderr under `RUST_LOG` and never affect stdout.

use gridwalk_harness::logging;
use gridwalk_harness::runner::run_search;
use gridwalk_harness::worlds::fixture_by_name;
use gridwalk_search::policy::SearchPolicyV1;

fn main() {
    logging::init();

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "closed_improvement".to_string());
    let mut map = fixture_by_name(&name)
        .unwrap_or_else(|| panic!("unknown fixture {name}"))
        .expect("fixture builds");

    let policy = SearchPolicyV1 {
        check_frontier_invariants: true,
        ..SearchPolicyV1::default()
    };
    let run = run_search(&mut map, &policy).expect("search run failed");

    let summary = run
        .report
        .artifact("run_summary.json")
        .expect("missing run_summary.json");
    let summary: serde_json::Value =
        serde_json::from_slice(&summary.content).expect("invalid summary JSON");
    let field = |key: &str| summary[key].as_str().unwrap_or("").to_string();

    let metadata = &run.result.graph.metadata;

    println!("fixture={name}");
    println!("report_digest={}", run.report.digest.as_str());
    println!("search_graph_digest={}", field("search_graph_digest"));
    println!("path_digest={}", field("path_digest"));
    println!("policy_digest={}", field("policy_digest"));
    println!("termination_reason={}", field("termination_reason"));
    println!("total_expansions={}", metadata.total_expansions);
    println!("total_propagation_updates={}", metadata.total_propagation_updates);
    println!("artifact_count={}", run.report.artifacts.len());
    match &run.path {
        Some(path) => println!("total_cost={}", path.total_cost),
        None => println!("total_cost=none"),
    }
}
