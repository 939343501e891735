//! The Executor - single entry point to the fake store.
//!
//! The Executor routes parsed commands to their handlers. It holds the
//! keyspace behind a shared lock, so clones of an executor see the same data
//! (a loopback server and an in-process channel can share one store).

use std::sync::Arc;

use parking_lot::Mutex;
use respcheck_core::{CommandChannel, Error as HarnessError, Reply, Result as HarnessResult};
use tracing::debug;

use crate::handlers::{hash, keys, string};
use crate::keyspace::Keyspace;
use crate::{Command, Result};

/// The command executor.
///
/// # Thread Safety
///
/// Executor is `Send + Sync`; each command runs under the keyspace lock, so
/// commands from different clones are serialized.
///
/// # Example
///
/// ```ignore
/// use respcheck_memstore::Executor;
/// use respcheck_core::Reply;
///
/// let store = Executor::new();
/// assert_eq!(store.execute_line("HSET k field value"), Reply::Integer(1));
/// assert_eq!(store.execute_line("HSTRLEN k field"), Reply::Integer(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Executor {
    keyspace: Arc<Mutex<Keyspace>>,
}

impl Executor {
    /// Create an executor over an empty keyspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a single command.
    ///
    /// Returns the success reply, or the error the store answers with.
    pub fn execute(&self, cmd: Command) -> Result<Reply> {
        let mut ks = self.keyspace.lock();
        match cmd {
            // Connection commands
            Command::Ping { message: None } => Ok(Reply::Status("PONG".to_string())),
            Command::Ping {
                message: Some(message),
            } => Ok(Reply::Text(message)),
            Command::Echo { message } => Ok(Reply::Text(message)),

            // Keyspace commands
            Command::FlushDb => keys::flushdb(&mut ks),
            Command::Del { keys: names } => keys::del(&mut ks, &names),
            Command::Exists { keys: names } => keys::exists(&mut ks, &names),
            Command::Expire { key, seconds } => keys::expire(&mut ks, &key, seconds),
            Command::Ttl { key } => keys::ttl(&mut ks, &key),

            // String commands
            Command::Set { key, value, ttl } => string::set(&mut ks, &key, value, ttl),
            Command::Get { key } => string::get(&mut ks, &key),

            // Hash commands
            Command::HSet { key, pairs } => hash::hset(&mut ks, &key, pairs),
            Command::HGet { key, field } => hash::hget(&mut ks, &key, &field),
            Command::HDel { key, fields } => hash::hdel(&mut ks, &key, &fields),
            Command::HLen { key } => hash::hlen(&mut ks, &key),
            Command::HExists { key, field } => hash::hexists(&mut ks, &key, &field),
            Command::HStrLen { key, field } => hash::hstrlen(&mut ks, &key, &field),
            Command::HGetAll { key } => hash::hgetall(&mut ks, &key),
        }
    }

    /// Parse and execute one request, folding every failure into the reply
    /// the store sends back.
    pub fn execute_args(&self, args: &[String]) -> Reply {
        match Command::parse(args) {
            Ok(cmd) => {
                let name = cmd.name();
                let reply = self.execute(cmd).unwrap_or_else(Reply::from);
                debug!(target: "respcheck::store", command = name, reply = %reply, "Executed");
                reply
            }
            Err(e) => {
                debug!(target: "respcheck::store", error = %e, "Rejected request");
                Reply::from(e)
            }
        }
    }

    /// Tokenize a command line and execute it.
    ///
    /// A line that cannot be tokenized answers `ERR syntax error`, the way a
    /// server answers a request it cannot frame.
    pub fn execute_line(&self, line: &str) -> Reply {
        match respcheck_wire::tokenize(line) {
            Ok(args) => self.execute_args(&args),
            Err(_) => Reply::from(crate::Error::Syntax),
        }
    }

    /// Number of keys currently stored (expired keys may still be counted).
    pub fn key_count(&self) -> usize {
        self.keyspace.lock().len()
    }
}

/// In-process channel: commands are tokenized exactly as for the network
/// path but executed directly against the keyspace.
impl CommandChannel for Executor {
    fn fire(&mut self, command: &str) -> HarnessResult<Reply> {
        let args = respcheck_wire::tokenize(command)?;
        if args.is_empty() {
            return Err(HarnessError::InvalidCommand {
                command: command.to_string(),
                reason: "empty command".to_string(),
            });
        }
        Ok(self.execute_args(&args))
    }
}
