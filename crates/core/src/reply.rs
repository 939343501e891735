//! Typed replies
//!
//! A [`Reply`] is the decoded form of one protocol response. The variant is
//! chosen by the reply's leading marker and is never coerced afterwards:
//!
//! - `Integer(5)` is not `Text("5")`
//! - `Status("OK")` is not `Text("OK")`
//! - `Error("ERR ...")` keeps its error-code prefix verbatim
//! - a bulk payload that is not UTF-8 is `Bytes`, never a lossy `Text`
//!
//! Equality is structural: tag and payload must both match exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical WRONGTYPE error text emitted by RESP stores.
pub const WRONGTYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

/// A decoded protocol reply.
///
/// In suite files replies are written externally tagged, e.g.
/// `{ integer = 1 }`, `{ status = "OK" }`, `{ error = "ERR ..." }` or `"nil"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reply {
    /// Signed 64-bit integer reply (`:`)
    Integer(i64),
    /// Bulk string reply (`$`)
    Text(String),
    /// Bulk string reply whose payload is not valid UTF-8, kept byte for byte
    Bytes(Vec<u8>),
    /// Error reply (`-`), code followed by message
    Error(String),
    /// Simple status reply (`+`), e.g. `OK`
    Status(String),
    /// Null bulk or null array reply
    Nil,
    /// Array reply (`*`)
    Array(Vec<Reply>),
}

impl Reply {
    /// `Status("OK")`, the usual acknowledgement
    pub fn ok() -> Self {
        Reply::Status("OK".to_string())
    }

    /// Error reply constructor
    pub fn error(msg: impl Into<String>) -> Self {
        Reply::Error(msg.into())
    }

    /// Text reply constructor
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }

    /// The arity error a store returns for `verb` (lower-cased in the text).
    pub fn wrong_arity(verb: &str) -> Self {
        Reply::Error(format!(
            "ERR wrong number of arguments for '{}' command",
            verb.to_ascii_lowercase()
        ))
    }

    /// The WRONGTYPE error reply.
    pub fn wrong_type() -> Self {
        Reply::Error(WRONGTYPE.to_string())
    }

    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Reply::Integer(_) => "Integer",
            Reply::Text(_) => "Text",
            Reply::Bytes(_) => "Bytes",
            Reply::Error(_) => "Error",
            Reply::Status(_) => "Status",
            Reply::Nil => "Nil",
            Reply::Array(_) => "Array",
        }
    }

    /// Check if this is an error reply
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Error code of an error reply (`ERR`, `WRONGTYPE`, ...)
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Reply::Error(msg) => msg.split_whitespace().next(),
            _ => None,
        }
    }

    /// Get as i64 if this is an integer reply
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the textual payload of a text, status or error reply
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Reply::Text(s) | Reply::Status(s) | Reply::Error(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Reply {
    fn from(i: i64) -> Self {
        Reply::Integer(i)
    }
}

/// Renders replies the way `redis-cli` prints them.
impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Integer(i) => write!(f, "(integer) {}", i),
            Reply::Text(s) => write!(f, "{:?}", s),
            Reply::Bytes(b) => write!(f, "\"{}\"", b.escape_ascii()),
            Reply::Error(s) => write!(f, "(error) {}", s),
            Reply::Status(s) => write!(f, "{}", s),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Array(items) if items.is_empty() => write!(f, "(empty array)"),
            Reply::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {}", i + 1, item)?;
                }
                Ok(())
            }
        }
    }
}
