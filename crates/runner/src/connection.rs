//! Connection provider
//!
//! A [`Connection`] owns exactly one TCP session to the store under test. It
//! is opened once per group, shared by every case in the group, and closed
//! exactly once: either explicitly through [`Connection::close`] or when the
//! value is dropped.

use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use respcheck_core::{CommandChannel, Error, HarnessConfig, Reply, Result};
use respcheck_wire::{encode_line, ReplyReader};
use tracing::{debug, info, warn};

struct Session {
    writer: TcpStream,
    reader: ReplyReader<TcpStream>,
}

/// An exclusively-owned client session.
///
/// # Example
///
/// ```ignore
/// use respcheck_core::{CommandChannel, HarnessConfig};
/// use respcheck_runner::Connection;
///
/// let mut conn = Connection::acquire(&HarnessConfig::from_env())?;
/// let reply = conn.fire("PING")?;
/// conn.close();
/// ```
pub struct Connection {
    addr: String,
    session: Option<Session>,
}

impl Connection {
    /// Open a connection to `config.addr`.
    ///
    /// Every resolved address is tried in turn with the configured connect
    /// timeout. The read timeout bounds each wait for a reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the address does not resolve, no
    /// resolved address accepts the connection, or the socket cannot be
    /// configured.
    pub fn acquire(config: &HarnessConfig) -> Result<Self> {
        let unreachable = |reason: String| Error::Connection {
            addr: config.addr.clone(),
            reason,
        };

        let candidates: Vec<SocketAddr> = config
            .addr
            .to_socket_addrs()
            .map_err(|e| unreachable(e.to_string()))?
            .collect();
        if candidates.is_empty() {
            return Err(unreachable("address resolved to nothing".to_string()));
        }

        let mut last_failure = String::new();
        let mut stream = None;
        for candidate in &candidates {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(candidate, timeout),
                None => TcpStream::connect(candidate),
            };
            match attempt {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    debug!(target: "respcheck::conn", addr = %candidate, error = %e, "Connect attempt failed");
                    last_failure = e.to_string();
                }
            }
        }
        let stream = stream.ok_or_else(|| unreachable(last_failure))?;

        stream
            .set_read_timeout(config.read_timeout())
            .map_err(|e| unreachable(e.to_string()))?;
        stream
            .set_nodelay(true)
            .map_err(|e| unreachable(e.to_string()))?;
        let writer = stream.try_clone().map_err(|e| unreachable(e.to_string()))?;

        info!(target: "respcheck::conn", addr = %config.addr, "Connection acquired");
        Ok(Self {
            addr: config.addr.clone(),
            session: Some(Session {
                writer,
                reader: ReplyReader::new(stream),
            }),
        })
    }

    /// Open a connection, run `f` with it, and close it whatever `f` returns.
    pub fn scoped<T>(
        config: &HarnessConfig,
        f: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        let mut conn = Self::acquire(config)?;
        let result = f(&mut conn);
        conn.close();
        result
    }

    /// Close the session. Calling this more than once is a no-op.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            // The peer may already be gone; shutdown errors carry no information.
            let _ = session.writer.shutdown(Shutdown::Both);
            info!(target: "respcheck::conn", addr = %self.addr, "Connection released");
        }
    }

    /// Whether the session is still open.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Configured target address.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("addr", &self.addr)
            .field("open", &self.is_open())
            .finish()
    }
}

impl CommandChannel for Connection {
    /// Send one request and read its reply.
    ///
    /// A failed exchange leaves the stream at an unknown position: a late
    /// reply or the rest of a malformed frame would be read as the answer to
    /// the next command. The session is therefore closed on any transport or
    /// decode error, and every later call fails with [`Error::Transport`].
    fn fire(&mut self, command: &str) -> Result<Reply> {
        let request = encode_line(command)?;
        let session = self.session.as_mut().ok_or_else(|| {
            Error::transport(command, "connection closed after an earlier failure")
        })?;

        let result = session
            .writer
            .write_all(&request)
            .and_then(|()| session.writer.flush())
            .map_err(|e| Error::transport(command, e))
            .and_then(|()| session.reader.read_reply(command));

        if let Err(e) = &result {
            warn!(target: "respcheck::conn", addr = %self.addr, error = %e, "Exchange failed, closing session");
            self.close();
        }
        result
    }
}
