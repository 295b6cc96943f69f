//! Report directory persistence on real search runs.

use gridwalk_harness::report::verify_report;
use gridwalk_harness::report_dir::{read_report_dir, write_report_dir, ReportDirReadError};
use gridwalk_harness::runner::run_search;
use gridwalk_harness::worlds::{rediscovery, walled};
use gridwalk_search::policy::SearchPolicyV1;

#[test]
fn successful_run_round_trips_through_disk() {
    let mut map = rediscovery::closed_improvement().unwrap();
    let run = run_search(&mut map, &SearchPolicyV1::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&run.report, dir.path()).unwrap();
    let loaded = read_report_dir(dir.path()).unwrap();

    assert_eq!(loaded.digest, run.report.digest);
    assert_eq!(loaded.artifacts, run.report.artifacts);
    verify_report(&loaded).unwrap();
}

#[test]
fn failed_run_round_trips_through_disk() {
    let mut map = walled::isolated_goal().unwrap();
    let run = run_search(&mut map, &SearchPolicyV1::default()).unwrap();
    assert!(run.path.is_none());

    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&run.report, dir.path()).unwrap();
    let loaded = read_report_dir(dir.path()).unwrap();
    assert_eq!(loaded.digest, run.report.digest);
}

#[test]
fn edited_path_artifact_is_rejected() {
    let mut map = rediscovery::closed_improvement().unwrap();
    let run = run_search(&mut map, &SearchPolicyV1::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&run.report, dir.path()).unwrap();
    std::fs::write(
        dir.path().join("path.json"),
        br#"{"found":false,"termination_reason":"frontier_exhausted"}"#,
    )
    .unwrap();

    let err = read_report_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ReportDirReadError::Verify(_)), "got {err}");
}

#[test]
fn writing_twice_is_byte_identical() {
    let mut first_map = rediscovery::closed_improvement().unwrap();
    let mut second_map = rediscovery::closed_improvement().unwrap();
    let first = run_search(&mut first_map, &SearchPolicyV1::default()).unwrap();
    let second = run_search(&mut second_map, &SearchPolicyV1::default()).unwrap();

    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    write_report_dir(&first.report, a.path()).unwrap();
    write_report_dir(&second.report, b.path()).unwrap();

    for name in first.report.artifacts.keys() {
        assert_eq!(
            std::fs::read(a.path().join(name)).unwrap(),
            std::fs::read(b.path().join(name)).unwrap(),
            "{name} differs"
        );
    }
}
