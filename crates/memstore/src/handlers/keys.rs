//! Keyspace command handlers.

use std::time::Duration;

use respcheck_core::Reply;

use crate::keyspace::{deadline, Keyspace, Ttl};
use crate::{Error, Result};

/// Handle FLUSHDB.
pub fn flushdb(ks: &mut Keyspace) -> Result<Reply> {
    ks.clear();
    Ok(Reply::ok())
}

/// Handle DEL. Returns the number of keys removed.
pub fn del(ks: &mut Keyspace, keys: &[String]) -> Result<Reply> {
    let removed = keys.iter().filter(|k| ks.remove(k)).count();
    Ok(Reply::Integer(removed as i64))
}

/// Handle EXISTS. A key named twice is counted twice.
pub fn exists(ks: &mut Keyspace, keys: &[String]) -> Result<Reply> {
    let live = keys.iter().filter(|k| ks.contains(k)).count();
    Ok(Reply::Integer(live as i64))
}

/// Handle EXPIRE. A non-positive timeout deletes the key; a deadline past
/// the clock's range is rejected.
pub fn expire(ks: &mut Keyspace, key: &str, seconds: i64) -> Result<Reply> {
    let applied = if seconds <= 0 {
        ks.remove(key)
    } else {
        let at = deadline(Duration::from_secs(seconds as u64)).ok_or_else(|| {
            Error::InvalidExpire {
                verb: "expire".into(),
            }
        })?;
        ks.expire(key, at)
    };
    Ok(Reply::Integer(applied as i64))
}

/// Handle TTL. `-2` for a missing key, `-1` for a key without deadline,
/// otherwise whole seconds remaining, rounded to nearest.
pub fn ttl(ks: &mut Keyspace, key: &str) -> Result<Reply> {
    let secs = match ks.ttl(key) {
        Ttl::Missing => -2,
        Ttl::Persistent => -1,
        Ttl::Expires(left) => ((left.as_millis() + 500) / 1000) as i64,
    };
    Ok(Reply::Integer(secs))
}
