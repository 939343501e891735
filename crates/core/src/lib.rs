//! Core types for respcheck
//!
//! This crate defines the data the conformance harness works with:
//! - Reply: typed decoded protocol reply
//! - Case / Step: ordered command, expected reply and delay triples
//! - Suite: named group of cases, loadable from TOML
//! - HarnessConfig: connection target and timeouts
//! - CommandChannel: the seam between the harness and a store
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod config;
pub mod error;
pub mod reply;
pub mod suite;
pub mod traits;

pub use case::{Case, Step};
pub use config::{HarnessConfig, ADDR_ENV, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use reply::{Reply, WRONGTYPE};
pub use suite::Suite;
pub use traits::CommandChannel;
