//! HSTRLEN cases over TCP against the loopback server

use crate::common::*;
use respcheck::{CaseRunner, CommandChannel, Connection, Reply, Suite};

#[test]
fn all_cases_pass_over_tcp() {
    init_tracing();
    let (addr, _store) = spawn_server();
    let runner = CaseRunner::new(config_for(addr));

    let report = runner
        .run_suite(&Suite::new("HSTRLEN", hstrlen_cases()))
        .unwrap();
    assert!(report.passed(), "{}", report);
}

#[test]
fn reset_clears_prior_state() {
    init_tracing();
    let (addr, store) = spawn_server();
    store.execute_line("HSET key_hStrLen2 field stale");
    store.execute_line("HSET key_hStrLen3 field stale");

    let runner = CaseRunner::new(config_for(addr));
    let report = runner
        .run_suite(&Suite::new("HSTRLEN", hstrlen_cases()))
        .unwrap();
    // Without the reset the HSETs would answer 0 instead of 1.
    assert!(report.passed(), "{}", report);
}

#[test]
fn replies_decode_verbatim() {
    let (addr, _store) = spawn_server();
    let mut conn = Connection::acquire(&config_for(addr)).unwrap();

    assert_eq!(
        conn.fire("SET string_key string_value"),
        Ok(Reply::Status("OK".into()))
    );
    assert_eq!(
        conn.fire("HSTRLEN string_key field"),
        Ok(Reply::Error(
            "WRONGTYPE Operation against a key holding the wrong kind of value".into()
        ))
    );
    assert_eq!(
        conn.fire("HSTRLEN"),
        Ok(Reply::Error(
            "ERR wrong number of arguments for 'hstrlen' command".into()
        ))
    );
    assert_eq!(conn.fire("GET missing"), Ok(Reply::Nil));
    conn.close();
}

#[test]
fn connection_is_released_after_group() {
    let (addr, store) = spawn_server();
    let runner = CaseRunner::new(config_for(addr));
    runner
        .run_suite(&Suite::new("HSTRLEN", hstrlen_cases()))
        .unwrap();

    // A second group gets its own connection and its own reset.
    let report = runner
        .run_suite(&Suite::new("HSTRLEN", hstrlen_cases()))
        .unwrap();
    assert!(report.passed(), "{}", report);
    assert_eq!(store.key_count(), 4);
}
