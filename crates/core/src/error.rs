//! Error types for the conformance harness
//!
//! Every harness failure is represented by the [`Error`] enum. Variants are
//! split into two families:
//! - **Structural**: the harness or the store is broken (`Connection`,
//!   `Transport`, `Decode`, `Reset`, `Config`, `InvalidCase`, `InvalidCommand`)
//! - **Conformance**: the store answered, but not as expected
//!   (`AssertionMismatch`)
//!
//! Errors are `Clone + PartialEq` so they can be stored inside reports and
//! compared in tests; underlying I/O errors are flattened to their message.

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Harness errors.
///
/// # Categories
///
/// | Category | Variants | Scope |
/// |----------|----------|-------|
/// | Transport | `Connection`, `Transport` | run / case |
/// | Protocol | `Decode` | case |
/// | Input | `InvalidCase`, `InvalidCommand`, `Config` | before the run |
/// | Setup | `Reset` | run |
/// | Conformance | `AssertionMismatch` | reported, never raised mid-case |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // ==================== Transport ====================
    /// The store is unreachable or the connection could not be configured
    #[error("cannot connect to {addr}: {reason}")]
    Connection {
        /// Target address
        addr: String,
        /// Underlying failure
        reason: String,
    },

    /// The connection failed while a command was in flight
    #[error("transport failure during '{command}': {reason}")]
    Transport {
        /// Command being dispatched
        command: String,
        /// Underlying failure
        reason: String,
    },

    // ==================== Protocol ====================
    /// The reply bytes do not match the reply grammar
    #[error("malformed reply: {reason} (raw: \"{}\")", .raw.escape_ascii())]
    Decode {
        /// The offending bytes, kept for diagnosis
        raw: Vec<u8>,
        /// What was wrong with them
        reason: String,
    },

    // ==================== Input ====================
    /// A case violates its structural invariants
    #[error("invalid case '{case}': {reason}")]
    InvalidCase {
        /// Case name
        case: String,
        /// Violated invariant
        reason: String,
    },

    /// A command string cannot be turned into a request
    #[error("invalid command '{command}': {reason}")]
    InvalidCommand {
        /// The command as written
        command: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration or suite file problem
    #[error("configuration error: {reason}")]
    Config {
        /// Description of the problem
        reason: String,
    },

    // ==================== Setup ====================
    /// The reset command was rejected by the store
    #[error("reset command '{command}' failed: {reply}")]
    Reset {
        /// The reset command issued
        command: String,
        /// Rendered reply or failure
        reply: String,
    },

    // ==================== Conformance ====================
    /// One or more steps produced a reply different from the expected one
    #[error("case '{case}' diverged in {mismatches} step(s):\n{detail}")]
    AssertionMismatch {
        /// Case name
        case: String,
        /// Number of divergent steps
        mismatches: usize,
        /// Rendered list of divergences
        detail: String,
    },
}

impl Error {
    /// Create a transport error for a command
    pub fn transport(command: impl Into<String>, reason: impl ToString) -> Self {
        Error::Transport {
            command: command.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a decode error carrying the raw bytes
    pub fn decode(raw: impl Into<Vec<u8>>, reason: impl Into<String>) -> Self {
        Error::Decode {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Whether this error must stop the whole group rather than one case.
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(
            self,
            Error::Connection { .. } | Error::Reset { .. } | Error::Config { .. }
        )
    }
}
