//! HSTRLEN cases loaded from the declarative suite file

use crate::common::*;
use respcheck::memstore::Executor;
use respcheck::{CaseRunner, Suite};

#[test]
fn suite_file_matches_code_cases() {
    let suite = load_suite();
    assert_eq!(suite.name(), "HSTRLEN");
    assert_eq!(suite.cases(), hstrlen_cases().as_slice());
}

#[test]
fn suite_file_passes_in_process() {
    init_tracing();
    let report = CaseRunner::default()
        .run_suite_on(&mut Executor::new(), &load_suite())
        .unwrap();
    assert!(report.passed(), "{}", report);
}

#[test]
fn suite_file_from_temp_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hstrlen.toml");
    std::fs::copy(suite_path(), &path).unwrap();

    let suite = Suite::from_file(&path).unwrap();
    assert_eq!(suite.cases().len(), 6);
}
