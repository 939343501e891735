//! Reset semantics and accumulation across steps and cases

use crate::common::*;
use respcheck::memstore::Executor;
use respcheck::{Case, CaseRunner, CommandChannel, Reply};

fn length_case() -> Case {
    Case::new("length")
        .step("HSET key_hStrLen3 field HelloWorld", Reply::Integer(1))
        .step("HSTRLEN key_hStrLen3 field", Reply::Integer(10))
}

#[test]
fn reset_is_idempotent() {
    init_tracing();
    let runner = CaseRunner::default();

    let mut once = Executor::new();
    once.fire("HSET key_hStrLen3 field stale").unwrap();
    runner.reset(&mut once).unwrap();
    let first = runner.run_case(&mut once, &length_case());

    let mut twice = Executor::new();
    twice.fire("HSET key_hStrLen3 field stale").unwrap();
    runner.reset(&mut twice).unwrap();
    runner.reset(&mut twice).unwrap();
    let second = runner.run_case(&mut twice, &length_case());

    assert!(first.passed());
    assert_eq!(first, second);
}

#[test]
fn reset_runs_once_per_group_not_per_case() {
    init_tracing();
    // The second case depends on the key written by the first.
    let cases = vec![
        length_case(),
        Case::new("overwrite")
            .step("HSET key_hStrLen3 field Hi", Reply::Integer(0))
            .step("HSTRLEN key_hStrLen3 field", Reply::Integer(2)),
    ];
    let report = CaseRunner::default()
        .run_group(&mut Executor::new(), "g", &cases)
        .unwrap();
    assert!(report.passed(), "{}", report);
}

#[test]
fn mismatches_accumulate_across_steps_and_cases() {
    init_tracing();
    let cases = vec![
        Case::new("first")
            .step("HSTRLEN missing field", Reply::Integer(1))
            .step("HSET h f v", Reply::Integer(1))
            .step("HSTRLEN h f", Reply::Integer(2)),
        Case::new("second")
            .step("HLEN h", Reply::Integer(1))
            .step("HGET h f", Reply::text("V")),
    ];
    let report = CaseRunner::default()
        .run_group(&mut Executor::new(), "g", &cases)
        .unwrap();

    assert_eq!(report.steps_run(), 5);
    assert_eq!(report.mismatch_count(), 3);
    assert_eq!(report.cases[0].mismatch_count(), 2);
    assert_eq!(report.cases[1].mismatch_count(), 1);

    let rendered = report.to_string();
    assert!(rendered.contains("step 3: HSTRLEN h f"), "{}", rendered);
    assert!(rendered.contains("expected: \"V\""), "{}", rendered);
    assert!(rendered.contains("actual:   \"v\""), "{}", rendered);
}

#[test]
fn delays_hold_back_expiring_steps() {
    init_tracing();
    let case = Case::new("expiry")
        .step("SET session token PX 100", Reply::ok())
        .step("GET session", Reply::text("token"))
        .step_after(
            std::time::Duration::from_millis(250),
            "GET session",
            Reply::Nil,
        );
    let report = CaseRunner::default().run_case(&mut Executor::new(), &case);
    assert!(report.passed(), "{}", report);
}
