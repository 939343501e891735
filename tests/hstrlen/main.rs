//! HSTRLEN Conformance Tests
//!
//! Runs the HSTRLEN cases three ways:
//! - in-process against the fake store
//! - over TCP against the loopback server
//! - against an external store when `RESPCHECK_ADDR` is set

mod common;

mod external;
mod in_process;
mod network;
mod suite_file;
