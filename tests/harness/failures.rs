//! Structural failures: what ends a case and what ends a group

use crate::common::*;
use respcheck::{Case, CaseRunner, CommandChannel, Connection, Error, Reply, Suite};

fn pong() -> Reply {
    Reply::Status("PONG".into())
}

#[test]
fn unreachable_store_is_connection_error() {
    init_tracing();
    let runner = CaseRunner::new(config_for(dead_addr()));
    let suite = Suite::new("g", vec![Case::new("a").step("PING", pong())]);

    match runner.run_suite(&suite) {
        Err(e @ Error::Connection { .. }) => assert!(e.is_fatal_to_run()),
        other => panic!("Expected Connection error, got {:?}", other),
    }
}

#[test]
fn malformed_reply_ends_case_and_closes_session() {
    init_tracing();
    let (addr, server) = scripted_server(vec![
        "+OK\r\n",                  // reset
        "?garbage\r\n:1\r\n",     // case a, step 1, with a stray frame behind it
        ":1\r\n",                   // never requested
    ]);
    let suite = Suite::new(
        "g",
        vec![
            Case::new("a").step("PING", pong()).step("PING", pong()),
            Case::new("b").step("HSTRLEN k f", Reply::Integer(1)),
        ],
    );

    let report = CaseRunner::new(config_for(addr)).run_suite(&suite).unwrap();
    server.join().unwrap();

    let a = &report.cases[0];
    assert!(a.outcomes.is_empty());
    assert!(matches!(a.fatal, Some(Error::Decode { .. })));

    // The stray `:1` must not be credited to case b.
    let b = &report.cases[1];
    assert!(b.outcomes.is_empty(), "{}", report);
    assert!(matches!(b.fatal, Some(Error::Transport { .. })));
    assert!(!b.passed());
    assert!(matches!(report.ensure_passed(), Err(Error::Decode { .. })));
}

#[test]
fn late_reply_is_not_credited_to_next_case() {
    init_tracing();
    let (addr, server) = delayed_server(vec![
        (0, "+OK\r\n"),  // reset
        (250, ":1\r\n"), // case a answers after the read timeout
        (0, ":5\r\n"),   // case b
    ]);
    let mut config = config_for(addr);
    config.read_timeout_ms = 100;
    let suite = Suite::new(
        "g",
        vec![
            Case::new("a").step("HSET k f value", Reply::Integer(1)),
            Case::new("b").step("HSTRLEN k f", Reply::Integer(1)),
        ],
    );

    let report = CaseRunner::new(config).run_suite(&suite).unwrap();
    server.join().unwrap();

    assert!(matches!(
        report.cases[0].fatal,
        Some(Error::Transport { .. })
    ));
    let b = &report.cases[1];
    assert!(b.outcomes.is_empty(), "{}", report);
    assert!(matches!(b.fatal, Some(Error::Transport { .. })));
    assert!(!report.passed());
}

#[test]
fn truncated_reply_is_transport_error() {
    init_tracing();
    let (addr, server) = scripted_server(vec!["+OK\r\n", "$10\r\nHello"]);
    let suite = Suite::new(
        "g",
        vec![
            Case::new("a").step("HGET k f", Reply::text("HelloWorld")),
            Case::new("b").step("PING", pong()),
        ],
    );

    let report = CaseRunner::new(config_for(addr)).run_suite(&suite).unwrap();
    server.join().unwrap();

    match &report.cases[0].fatal {
        Some(Error::Transport { command, reason }) => {
            assert_eq!(command, "HGET k f");
            assert!(reason.contains("closed"), "reason: {}", reason);
        }
        other => panic!("Expected Transport error, got {:?}", other),
    }
    // The peer is gone; the next case fails on its own.
    assert!(matches!(
        report.cases[1].fatal,
        Some(Error::Transport { .. })
    ));
}

#[test]
fn rejected_reset_aborts_group() {
    init_tracing();
    let (addr, server) = scripted_server(vec!["-ERR unknown command 'FLUSHDB'\r\n"]);
    let suite = Suite::new("g", vec![Case::new("a").step("PING", pong())]);

    match CaseRunner::new(config_for(addr)).run_suite(&suite) {
        Err(Error::Reset { command, reply }) => {
            assert_eq!(command, "FLUSHDB");
            assert!(reply.contains("unknown command"));
        }
        other => panic!("Expected Reset error, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn unterminated_quote_ends_case_without_sending() {
    init_tracing();
    let (addr, server) = scripted_server(vec!["+OK\r\n", "+PONG\r\n"]);
    let suite = Suite::new(
        "g",
        vec![
            Case::new("a").step("HSET k f \"open", Reply::Integer(1)),
            Case::new("b").step("PING", pong()),
        ],
    );

    let report = CaseRunner::new(config_for(addr)).run_suite(&suite).unwrap();
    server.join().unwrap();

    assert!(matches!(
        report.cases[0].fatal,
        Some(Error::InvalidCommand { .. })
    ));
    assert!(report.cases[1].passed(), "{}", report);
}

#[test]
fn wire_bytes_follow_declared_order() {
    let (addr, server) = scripted_server(vec![":1\r\n", ":10\r\n"]);
    let mut conn = Connection::acquire(&config_for(addr)).unwrap();

    assert_eq!(conn.fire("HSET key_hStrLen3 field HelloWorld"), Ok(Reply::Integer(1)));
    assert_eq!(conn.fire("HSTRLEN key_hStrLen3 field"), Ok(Reply::Integer(10)));
    conn.close();
    server.join().unwrap();
}
