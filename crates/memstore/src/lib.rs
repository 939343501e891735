//! # respcheck memstore
//!
//! An in-process fake of a RESP key-value store, used to exercise the
//! conformance harness without starting a server.
//!
//! It provides:
//! - [`Executor`] - parses and executes commands against an in-memory keyspace
//!   and implements [`CommandChannel`](respcheck_core::CommandChannel)
//! - [`Command`] - the typed instruction set
//! - [`Server`] - a loopback TCP server for end-to-end tests
//!
//! ## Supported commands
//!
//! | Type | Commands |
//! |------|----------|
//! | Connection | PING, ECHO |
//! | Keyspace | FLUSHDB, DEL, EXISTS, EXPIRE, TTL |
//! | String | SET (EX/PX), GET |
//! | Hash | HSET, HGET, HDEL, HLEN, HEXISTS, HSTRLEN, HGETALL |
//!
//! Error replies match a real server byte for byte (arity, WRONGTYPE, syntax).

#![warn(missing_docs)]

mod command;
mod error;
mod executor;
mod handlers;
pub mod keyspace;
mod server;

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use server::{serve_connection, Server};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;
