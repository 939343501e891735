//! Hash command handlers.
//!
//! A missing key behaves like an empty hash for every read. A hash whose last
//! field is deleted is removed from the keyspace.

use respcheck_core::Reply;

use crate::keyspace::{HashValue, Keyspace, Value};
use crate::{Error, Result};

fn read<'a>(ks: &'a mut Keyspace, key: &str) -> Result<Option<&'a HashValue>> {
    match ks.get(key) {
        None => Ok(None),
        Some(Value::Hash(h)) => Ok(Some(h)),
        Some(Value::Str(_)) => Err(Error::WrongType),
    }
}

fn len_reply(n: usize) -> Reply {
    Reply::Integer(n as i64)
}

/// Handle HSET. Returns the number of fields that were newly created.
pub fn hset(ks: &mut Keyspace, key: &str, pairs: Vec<(String, String)>) -> Result<Reply> {
    match ks.get(key) {
        Some(Value::Str(_)) => return Err(Error::WrongType),
        Some(Value::Hash(_)) => {}
        None => ks.set(key, Value::Hash(HashValue::new()), None),
    }
    let hash = match ks.get_mut(key) {
        Some(Value::Hash(h)) => h,
        _ => return Err(Error::WrongType),
    };

    let mut created = 0;
    for (field, value) in pairs {
        if hash.insert(field, value).is_none() {
            created += 1;
        }
    }
    Ok(len_reply(created))
}

/// Handle HGET.
pub fn hget(ks: &mut Keyspace, key: &str, field: &str) -> Result<Reply> {
    Ok(read(ks, key)?
        .and_then(|h| h.get(field))
        .map_or(Reply::Nil, |v| Reply::Text(v.clone())))
}

/// Handle HDEL. Returns the number of fields removed.
pub fn hdel(ks: &mut Keyspace, key: &str, fields: &[String]) -> Result<Reply> {
    let (removed, now_empty) = match ks.get_mut(key) {
        None => return Ok(len_reply(0)),
        Some(Value::Str(_)) => return Err(Error::WrongType),
        Some(Value::Hash(h)) => {
            let removed = fields
                .iter()
                .filter(|f| h.shift_remove(f.as_str()).is_some())
                .count();
            (removed, h.is_empty())
        }
    };
    if now_empty {
        ks.remove(key);
    }
    Ok(len_reply(removed))
}

/// Handle HLEN.
pub fn hlen(ks: &mut Keyspace, key: &str) -> Result<Reply> {
    Ok(len_reply(read(ks, key)?.map_or(0, |h| h.len())))
}

/// Handle HEXISTS.
pub fn hexists(ks: &mut Keyspace, key: &str, field: &str) -> Result<Reply> {
    let exists = read(ks, key)?.map_or(false, |h| h.contains_key(field));
    Ok(Reply::Integer(exists as i64))
}

/// Handle HSTRLEN. Length is in bytes; a missing key or field yields 0.
pub fn hstrlen(ks: &mut Keyspace, key: &str, field: &str) -> Result<Reply> {
    let len = read(ks, key)?
        .and_then(|h| h.get(field))
        .map_or(0, |v| v.len());
    Ok(len_reply(len))
}

/// Handle HGETALL. Fields and values alternate in insertion order.
pub fn hgetall(ks: &mut Keyspace, key: &str) -> Result<Reply> {
    let items = read(ks, key)?
        .map(|h| {
            h.iter()
                .flat_map(|(f, v)| [Reply::Text(f.clone()), Reply::Text(v.clone())])
                .collect()
        })
        .unwrap_or_default();
    Ok(Reply::Array(items))
}
