//! RESP wire codec for respcheck
//!
//! This crate implements the protocol layer between the harness and a store:
//! - `tokenize`: command line to argument list
//! - `encode`: arguments to a RESP request, replies to RESP bytes
//! - `decode`: RESP bytes to a typed [`Reply`](respcheck_core::Reply)

#![warn(missing_docs)]

pub mod decode;
pub mod encode;
pub mod tokenize;

pub use decode::{decode, parse, ReplyReader, MAX_BULK_LEN, MAX_DEPTH};
pub use encode::{encode_command, encode_reply, write_reply};
pub use tokenize::tokenize;

use respcheck_core::{Error, Result};

/// Tokenize a command line and encode it as a RESP request.
///
/// # Errors
///
/// Returns [`Error::InvalidCommand`] if the line has an unterminated quote or
/// contains no arguments.
pub fn encode_line(line: &str) -> Result<Vec<u8>> {
    let args = tokenize(line)?;
    if args.is_empty() {
        return Err(Error::InvalidCommand {
            command: line.to_string(),
            reason: "empty command".to_string(),
        });
    }
    Ok(encode_command(&args))
}
