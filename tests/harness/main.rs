//! Harness Behavior Tests
//!
//! Failure handling of the runner end to end:
//! - mismatches accumulate while later steps keep running
//! - malformed or truncated replies end only the current case
//! - unreachable stores and failed resets abort the group
//! - suite and configuration files are validated before anything runs

mod common;

mod config_files;
mod failures;
mod isolation;
