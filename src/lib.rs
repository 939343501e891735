//! respcheck - conformance harness for RESP key-value stores
//!
//! Cases are declared as ordered `(command, expected reply, delay)` steps.
//! The harness fires each command over a client connection, decodes the
//! reply and records every divergence from the expected value.
//!
//! # Quick Start
//!
//! ```ignore
//! use respcheck::{Case, CaseRunner, HarnessConfig, Reply, Suite};
//!
//! let case = Case::new("hstrlen_length")
//!     .step("HSET key_hStrLen3 field HelloWorld", Reply::Integer(1))
//!     .step("HSTRLEN key_hStrLen3 field", Reply::Integer(10));
//!
//! let runner = CaseRunner::new(HarnessConfig::from_env());
//! let report = runner.run_suite(&Suite::new("hstrlen", vec![case]))?;
//! report.ensure_passed()?;
//! ```
//!
//! # Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `respcheck-core` | replies, cases, suites, configuration, errors |
//! | `respcheck-wire` | tokenizer, RESP encoder and decoder |
//! | `respcheck-runner` | connection, dispatcher, assertions, runner, reports |
//! | `respcheck-memstore` | in-process fake store and loopback server |

pub use respcheck_core::*;
pub use respcheck_runner::*;

/// RESP wire codec.
pub mod wire {
    pub use respcheck_wire::*;
}

/// In-process fake store.
pub mod memstore {
    pub use respcheck_memstore::*;
}
