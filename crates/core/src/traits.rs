//! Core trait for reaching a store
//!
//! [`CommandChannel`] is the only way the harness talks to a store. It lets
//! the same cases run against a networked server or an in-process fake
//! without the runner knowing which.

use crate::error::Result;
use crate::reply::Reply;

/// Something that accepts one command line and answers with one reply.
///
/// Calls are strictly sequential: a channel never has two commands in
/// flight, so implementations need no internal locking for the harness.
///
/// # Errors
///
/// Implementations return:
/// - [`Error::InvalidCommand`](crate::Error::InvalidCommand) if the line
///   cannot be turned into a request
/// - [`Error::Transport`](crate::Error::Transport) if the exchange fails
/// - [`Error::Decode`](crate::Error::Decode) if the answer is malformed
///
/// A store-level error reply (e.g. `ERR ...`) is `Ok(Reply::Error(..))`,
/// not an `Err`.
pub trait CommandChannel {
    /// Send `command` and block until its reply arrives.
    fn fire(&mut self, command: &str) -> Result<Reply>;
}

impl<C: CommandChannel + ?Sized> CommandChannel for &mut C {
    fn fire(&mut self, command: &str) -> Result<Reply> {
        (**self).fire(command)
    }
}

impl<C: CommandChannel + ?Sized> CommandChannel for Box<C> {
    fn fire(&mut self, command: &str) -> Result<Reply> {
        (**self).fire(command)
    }
}
