//! Command dispatcher
//!
//! [`fire`] is the single path by which the runner sends a command. It adds
//! tracing around the channel call; tokenizing, framing and decoding are the
//! channel's job.

use std::time::Instant;

use respcheck_core::{CommandChannel, Reply, Result};
use tracing::{debug, warn};

/// Send one command over `channel` and wait for its reply.
///
/// No retries: a failed exchange is returned as is.
pub fn fire<C: CommandChannel + ?Sized>(channel: &mut C, command: &str) -> Result<Reply> {
    let started = Instant::now();
    let result = channel.fire(command);
    let elapsed_us = started.elapsed().as_micros() as u64;

    match &result {
        Ok(reply) => {
            debug!(target: "respcheck::runner", command, reply = %reply, elapsed_us, "Dispatched")
        }
        Err(e) => warn!(target: "respcheck::runner", command, error = %e, elapsed_us, "Dispatch failed"),
    }
    result
}
