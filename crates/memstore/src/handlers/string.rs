//! String command handlers.

use std::time::Duration;

use respcheck_core::Reply;

use crate::keyspace::{deadline, Keyspace, Value};
use crate::{Error, Result};

/// Handle SET. Overwrites a value of any type.
pub fn set(ks: &mut Keyspace, key: &str, value: String, ttl: Option<Duration>) -> Result<Reply> {
    let expires_at = ttl
        .map(|d| deadline(d).ok_or_else(|| Error::InvalidExpire { verb: "set".into() }))
        .transpose()?;
    ks.set(key, Value::Str(value), expires_at);
    Ok(Reply::ok())
}

/// Handle GET.
pub fn get(ks: &mut Keyspace, key: &str) -> Result<Reply> {
    match ks.get(key) {
        None => Ok(Reply::Nil),
        Some(Value::Str(s)) => Ok(Reply::Text(s.clone())),
        Some(Value::Hash(_)) => Err(Error::WrongType),
    }
}
