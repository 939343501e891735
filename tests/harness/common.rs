//! Common test utilities for harness behavior tests

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use once_cell::sync::Lazy;
use respcheck::HarnessConfig;

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

/// Read one complete RESP request (an array of bulk strings) from `stream`.
///
/// Returns `None` once the client hangs up.
pub fn read_request(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match stream.read(&mut byte) {
            Ok(0) | Err(_) => return None,
            Ok(_) => buf.push(byte[0]),
        }
        if respcheck::wire::parse(&buf).ok().flatten().is_some() {
            return Some(buf);
        }
    }
}

/// A raw server that answers the n-th request with `script[n]`, verbatim.
///
/// After the script runs out the connection is closed.
pub fn scripted_server(script: Vec<&'static str>) -> (SocketAddr, JoinHandle<()>) {
    delayed_server(script.into_iter().map(|answer| (0, answer)).collect())
}

/// Like [`scripted_server`], but each answer is held back for the paired
/// number of milliseconds.
pub fn delayed_server(script: Vec<(u64, &'static str)>) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        for (delay_ms, answer) in script {
            if read_request(&mut stream).is_none() {
                return;
            }
            thread::sleep(Duration::from_millis(delay_ms));
            if stream.write_all(answer.as_bytes()).is_err() {
                return;
            }
        }
    });
    (addr, handle)
}

/// An address with no listener behind it.
pub fn dead_addr() -> SocketAddr {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
}

/// Harness configuration targeting `addr`, with a short read timeout.
pub fn config_for(addr: SocketAddr) -> HarnessConfig {
    let mut config = HarnessConfig::with_addr(addr.to_string());
    config.read_timeout_ms = 2000;
    config
}
