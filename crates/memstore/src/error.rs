//! Error types for command execution.
//!
//! Every error the fake store can answer with is a variant of [`Error`]. The
//! `Display` text of each variant is exactly the error reply a RESP server
//! sends, so converting to a [`Reply`] is lossless.

use respcheck_core::{Reply, WRONGTYPE};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Error code |
/// |----------|----------|------------|
/// | Arity | `WrongArity` | `ERR` |
/// | Dispatch | `UnknownCommand`, `EmptyCommand` | `ERR` |
/// | Type | `WrongType` | `WRONGTYPE` |
/// | Validation | `Syntax`, `NotAnInteger`, `InvalidExpire` | `ERR` |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ==================== Arity ====================
    /// Wrong number of arguments for a known command
    #[error("ERR wrong number of arguments for '{verb}' command")]
    WrongArity {
        /// Lower-cased command name
        verb: String,
    },

    // ==================== Dispatch ====================
    /// Command name not recognised
    #[error("ERR unknown command '{verb}'")]
    UnknownCommand {
        /// Command name as sent
        verb: String,
    },

    /// Request had no arguments at all
    #[error("ERR empty command")]
    EmptyCommand,

    // ==================== Type Errors ====================
    /// Operation against a key holding another kind of value
    #[error("{}", WRONGTYPE)]
    WrongType,

    // ==================== Validation Errors ====================
    /// Unrecognised option or malformed option list
    #[error("ERR syntax error")]
    Syntax,

    /// Argument should have been an integer
    #[error("ERR value is not an integer or out of range")]
    NotAnInteger,

    /// Non-positive or overflowing expiry
    #[error("ERR invalid expire time in '{verb}' command")]
    InvalidExpire {
        /// Lower-cased command name
        verb: String,
    },
}

impl Error {
    /// Arity error for `verb`
    pub fn arity(verb: &str) -> Self {
        Error::WrongArity {
            verb: verb.to_ascii_lowercase(),
        }
    }
}

impl From<Error> for Reply {
    fn from(e: Error) -> Self {
        Reply::Error(e.to_string())
    }
}
