//! Concrete end-to-end scenarios on the fixture maps.

use gridwalk_harness::runner::run_search;
use gridwalk_harness::worlds::{detour, open_field, rediscovery, walled};
use gridwalk_kernel::grid::Position;
use gridwalk_search::graph::{CandidateOutcomeV1, TerminationReasonV1};
use gridwalk_search::path::{reconstruct_and_mark, PathError};
use gridwalk_search::policy::SearchPolicyV1;
use gridwalk_search::search::{search, SearchOutcomeV1};
use lock_tests::path_checks::is_connected;

fn checked() -> SearchPolicyV1 {
    SearchPolicyV1 {
        check_frontier_invariants: true,
        ..SearchPolicyV1::default()
    }
}

#[test]
fn open_3x3_costs_four_over_five_cells() {
    let mut map = open_field::open_3x3().unwrap();
    let run = run_search(&mut map, &checked()).unwrap();

    let path = run.path.unwrap();
    assert_eq!(path.total_cost, 4);
    assert_eq!(path.cells.len(), 5);
    assert_eq!(path.cells[0], Position::new(0, 0));
    assert_eq!(path.cells[4], Position::new(2, 2));
    assert!(is_connected(&path.cells));
}

#[test]
fn isolated_goal_is_a_failed_result_not_an_error() {
    let mut map = walled::isolated_goal().unwrap();
    let result = search(&map, &checked()).unwrap();

    assert_eq!(
        result.outcome,
        SearchOutcomeV1::Failed {
            reason: TerminationReasonV1::FrontierExhausted
        }
    );
    let err = reconstruct_and_mark(&result, &mut map, 5).unwrap_err();
    assert!(matches!(err, PathError::MissingResult { .. }));
    assert!(map.marked().is_empty());
}

#[test]
fn cheaper_detour_is_chosen_over_fewer_hops() {
    let mut map = detour::costly_direct().unwrap();
    let run = run_search(&mut map, &checked()).unwrap();
    let path = run.path.unwrap();

    assert_eq!(path.total_cost, 4);
    assert!(!path.cells.contains(&Position::new(0, 1)));
    assert_eq!(
        path.cells,
        vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(0, 2),
        ]
    );
}

#[test]
fn closed_node_improvement_propagates_exactly_once() {
    let map = rediscovery::closed_improvement().unwrap();
    let result = search(&map, &checked()).unwrap();
    assert_eq!(result.total_cost(), Some(7));

    let improvements: Vec<&CandidateOutcomeV1> = result
        .graph
        .expansions
        .iter()
        .flat_map(|e| e.candidates.iter().map(|c| &c.outcome))
        .filter(|o| matches!(o, CandidateOutcomeV1::Improved { .. }))
        .collect();
    assert_eq!(improvements.len(), 2);

    let closed: Vec<_> = improvements
        .iter()
        .filter_map(|o| match o {
            CandidateOutcomeV1::Improved {
                node_id,
                previous_g,
                new_g,
                was_closed: true,
                propagated,
            } => Some((*node_id, *previous_g, *new_g, propagated.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(closed.len(), 1);

    let (node_id, previous_g, new_g, propagated) = &closed[0];
    let improved = result.nodes.get(*node_id).unwrap();
    assert_eq!(improved.position(), Position::new(1, 2));
    assert_eq!((*previous_g, *new_g), (3, 2));

    let goal_id = result.goal_node_id().unwrap();
    assert_eq!(propagated, &vec![goal_id]);
    assert_eq!(result.graph.metadata.total_propagation_updates, 1);
    assert_eq!(result.nodes.get(goal_id).unwrap().parent_id(), Some(*node_id));
}

#[test]
fn expansion_budget_reports_failure() {
    let map = open_field::open_field(8).unwrap();
    let policy = SearchPolicyV1 {
        max_expansions: Some(3),
        ..checked()
    };
    let result = search(&map, &policy).unwrap();
    assert_eq!(
        result.graph.metadata.termination_reason,
        TerminationReasonV1::ExpansionBudgetExceeded
    );
    assert!(!result.is_goal_reached());
}
