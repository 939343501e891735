//! HSTRLEN cases against the in-process fake store

use crate::common::*;
use respcheck::memstore::Executor;
use respcheck::{CaseRunner, CommandChannel, Reply};

#[test]
fn all_cases_pass() {
    init_tracing();
    let mut store = Executor::new();
    let report = CaseRunner::default()
        .run_group(&mut store, "HSTRLEN", &hstrlen_cases())
        .unwrap();

    assert!(report.passed(), "{}", report);
    assert_eq!(report.cases.len(), 6);
    assert_eq!(report.steps_run(), 11);
    report.ensure_passed().unwrap();
}

#[test]
fn each_case_passes_in_isolation() {
    init_tracing();
    let runner = CaseRunner::default();
    for case in hstrlen_cases() {
        let mut store = Executor::new();
        let report = runner.run_group(&mut store, case.name(), std::slice::from_ref(&case)).unwrap();
        assert!(report.passed(), "{}", report);
    }
}

#[test]
fn hstrlen_reports_byte_length() {
    let mut store = Executor::new();
    assert_eq!(store.fire("HSET h greeting HelloWorld"), Ok(Reply::Integer(1)));
    assert_eq!(store.fire("HSTRLEN h greeting"), Ok(Reply::Integer(10)));
    assert_eq!(store.fire("HSET h spaced \"hello world\""), Ok(Reply::Integer(1)));
    assert_eq!(store.fire("HSTRLEN h spaced"), Ok(Reply::Integer(11)));
    assert_eq!(store.fire("HSET h empty \"\""), Ok(Reply::Integer(1)));
    assert_eq!(store.fire("HSTRLEN h empty"), Ok(Reply::Integer(0)));
}

#[test]
fn wrong_expectation_is_reported_not_raised() {
    init_tracing();
    let cases = vec![respcheck::Case::new("mistaken")
        .step("HSET key_hStrLen3 field HelloWorld", Reply::Integer(1))
        .step("HSTRLEN key_hStrLen3 field", Reply::Integer(11))
        .step("HSTRLEN key_hStrLen3 field", Reply::Integer(10))];

    let report = CaseRunner::default()
        .run_group(&mut Executor::new(), "HSTRLEN", &cases)
        .unwrap();

    let case = &report.cases[0];
    assert_eq!(case.outcomes.len(), 3);
    assert_eq!(case.mismatch_count(), 1);
    let mismatch = case.mismatches().next().unwrap();
    assert_eq!(mismatch.command, "HSTRLEN key_hStrLen3 field");
    assert_eq!(mismatch.expected, Reply::Integer(11));
    assert_eq!(mismatch.actual, Reply::Integer(10));
}
