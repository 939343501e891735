//! # respcheck runner
//!
//! Executes declarative cases against a RESP store and reports every reply
//! that diverges from the expected one.
//!
//! ## Architecture
//!
//! ```text
//! Suite / Case ──► CaseRunner ──► dispatch::fire ──► CommandChannel
//!                      │                                 ├─ Connection (TCP)
//!                      ▼                                 └─ in-process fake
//!                 Assertions ──► CaseReport ──► GroupReport
//! ```
//!
//! ## Failure model
//!
//! | Failure | Effect |
//! |---------|--------|
//! | Reply mismatch | recorded, case continues |
//! | Transport / Decode / InvalidCommand | current case ends, group continues |
//! | Connection / Reset / Config | group aborts with `Err` |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assert;
mod connection;
pub mod dispatch;
mod report;
mod runner;

pub use assert::{Assertions, StepOutcome};
pub use connection::Connection;
pub use dispatch::fire;
pub use report::{CaseReport, GroupReport};
pub use runner::CaseRunner;
