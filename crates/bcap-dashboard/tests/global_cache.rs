//! The process-wide model cache behind `load_status`. Kept in its own test
//! binary so no other test touches the global handle first.

use std::path::PathBuf;
use std::sync::Arc;

use bcap_dashboard::load_status;
use bcap_dashboard::page::ModelStatus;
use bcap_model::Regressor;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../bcap-model/tests/fixtures/battery_model.json")
}

#[test]
fn first_successful_load_is_reused_for_the_process() {
    let dir = tempfile::tempdir().expect("tempdir");

    let missing = load_status(&dir.path().join("battery_model.json"));
    assert!(!missing.is_ready(), "a failed load must not be cached");

    let ModelStatus::Ready(first) = load_status(&fixture()) else {
        panic!("fixture should load");
    };
    let ModelStatus::Ready(second) = load_status(&dir.path().join("elsewhere.json")) else {
        panic!("second call should hit the cache");
    };
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.describe().num_trees, 2);
    assert!(bcap_model::cache::global().is_loaded());
}
