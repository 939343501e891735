//! In-memory keyspace with lazy expiry.
//!
//! Entries past their deadline are removed the first time they are looked
//! up, so an expired key is indistinguishable from a missing one.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use indexmap::IndexMap;

/// Hash fields in insertion order.
pub type HashValue = IndexMap<String, String>;

/// A stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// String value (`SET`)
    Str(String),
    /// Hash value (`HSET`)
    Hash(HashValue),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map_or(false, |at| at <= now)
    }
}

/// Remaining lifetime of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Key does not exist
    Missing,
    /// Key exists without a deadline
    Persistent,
    /// Key expires after this long
    Expires(Duration),
}

/// Deadline `ttl` from now, or `None` if it is too far out to represent.
pub fn deadline(ttl: Duration) -> Option<Instant> {
    Instant::now().checked_add(ttl)
}

/// All keys of one logical database.
#[derive(Debug, Default)]
pub struct Keyspace {
    entries: HashMap<String, Entry>,
}

impl Keyspace {
    /// Create an empty keyspace
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop `key` if its deadline has passed.
    fn evict_if_expired(&mut self, key: &str) {
        let now = Instant::now();
        if self.entries.get(key).map_or(false, |e| e.is_expired(now)) {
            self.entries.remove(key);
        }
    }

    /// Live value for `key`
    pub fn get(&mut self, key: &str) -> Option<&Value> {
        self.evict_if_expired(key);
        self.entries.get(key).map(|e| &e.value)
    }

    /// Mutable live value for `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.evict_if_expired(key);
        self.entries.get_mut(key).map(|e| &mut e.value)
    }

    /// Whether `key` is live
    pub fn contains(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Store `value` under `key`, replacing any previous value and deadline.
    pub fn set(&mut self, key: &str, value: Value, expires_at: Option<Instant>) {
        self.entries
            .insert(key.to_string(), Entry { value, expires_at });
    }

    /// Remove `key`, returning whether it was live.
    pub fn remove(&mut self, key: &str) -> bool {
        self.evict_if_expired(key);
        self.entries.remove(key).is_some()
    }

    /// Set the deadline of a live key, returning whether it was live.
    pub fn expire(&mut self, key: &str, at: Instant) -> bool {
        self.evict_if_expired(key);
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.expires_at = Some(at);
                true
            }
            None => false,
        }
    }

    /// Remaining lifetime of `key`
    pub fn ttl(&mut self, key: &str) -> Ttl {
        self.evict_if_expired(key);
        match self.entries.get(key) {
            None => Ttl::Missing,
            Some(Entry {
                expires_at: None, ..
            }) => Ttl::Persistent,
            Some(Entry {
                expires_at: Some(at),
                ..
            }) => Ttl::Expires(at.saturating_duration_since(Instant::now())),
        }
    }

    /// Remove every key
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored keys, possibly counting expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
