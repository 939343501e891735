//! Common test utilities for HSTRLEN conformance tests

use std::net::SocketAddr;
use std::path::PathBuf;
use std::thread;

use once_cell::sync::Lazy;
use respcheck::memstore::{Executor, Server};
use respcheck::{Case, HarnessConfig, Reply, Suite};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Install a test log subscriber once per process (filter via `RUST_LOG`).
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// The HSTRLEN cases, built in code.
pub fn hstrlen_cases() -> Vec<Case> {
    let arity = Reply::wrong_arity("HSTRLEN");
    vec![
        Case::new("HSTRLEN with wrong number of arguments")
            .step("HSTRLEN", arity.clone())
            .step("HSTRLEN key field another_field", arity.clone()),
        Case::new("HSTRLEN with missing field")
            .step("HSET key_hStrLen1 field value", Reply::Integer(1))
            .step("HSTRLEN key_hStrLen1", arity),
        Case::new("HSTRLEN with non-existent key")
            .step("HSTRLEN non_existent_key field", Reply::Integer(0)),
        Case::new("HSTRLEN with non-existent field")
            .step("HSET key_hStrLen2 field value", Reply::Integer(1))
            .step("HSTRLEN key_hStrLen2 wrong_field", Reply::Integer(0)),
        Case::new("HSTRLEN with existing key and field")
            .step("HSET key_hStrLen3 field HelloWorld", Reply::Integer(1))
            .step("HSTRLEN key_hStrLen3 field", Reply::Integer(10)),
        Case::new("HSTRLEN with non-hash")
            .step("SET string_key string_value", Reply::ok())
            .step("HSTRLEN string_key field", Reply::wrong_type()),
    ]
}

/// Path of the declarative HSTRLEN suite.
pub fn suite_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/hstrlen/hstrlen.toml")
}

/// Load the declarative HSTRLEN suite.
pub fn load_suite() -> Suite {
    Suite::from_file(&suite_path()).unwrap()
}

/// Start a loopback server over a fresh store.
///
/// The server thread runs for the rest of the test process.
pub fn spawn_server() -> (SocketAddr, Executor) {
    let server = Server::bind("127.0.0.1:0").unwrap();
    let addr = server.local_addr().unwrap();
    let store = server.store();
    let _handle: thread::JoinHandle<()> = server.spawn();
    (addr, store)
}

/// Harness configuration targeting `addr`.
pub fn config_for(addr: SocketAddr) -> HarnessConfig {
    HarnessConfig::with_addr(addr.to_string())
}
