//! Command handlers organized by value type.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `keys` | FLUSHDB, DEL, EXISTS, EXPIRE, TTL |
//! | `string` | SET, GET |
//! | `hash` | HSET, HGET, HDEL, HLEN, HEXISTS, HSTRLEN, HGETALL |
//!
//! Handlers receive the locked keyspace and already-validated arguments.

pub mod hash;
pub mod keys;
pub mod string;
