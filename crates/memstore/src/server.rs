//! Loopback RESP server backed by an [`Executor`].
//!
//! Lets the networked path of the harness run end-to-end without an external
//! process. Each accepted connection is served on its own thread until the
//! client disconnects.

use std::io::{self, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::thread::{self, JoinHandle};

use respcheck_core::{Error as HarnessError, Reply};
use respcheck_wire::{encode_reply, ReplyReader};
use tracing::{debug, warn};

use crate::Executor;

/// A bound listener plus the store it serves.
pub struct Server {
    listener: TcpListener,
    store: Executor,
}

impl Server {
    /// Bind a listener serving a fresh, empty store.
    pub fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        Self::bind_with(addr, Executor::new())
    }

    /// Bind a listener serving an existing store.
    pub fn bind_with(addr: impl ToSocketAddrs, store: Executor) -> io::Result<Self> {
        Ok(Self {
            listener: TcpListener::bind(addr)?,
            store,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle to the served store (shares its keyspace).
    pub fn store(&self) -> Executor {
        self.store.clone()
    }

    /// Accept one client and serve it until it disconnects.
    pub fn serve_one(&self) -> io::Result<()> {
        let (stream, peer) = self.listener.accept()?;
        debug!(target: "respcheck::store", %peer, "Client connected");
        serve_connection(&self.store, stream)
    }

    /// Serve clients on a background thread, one thread per connection.
    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || {
            for stream in self.listener.incoming() {
                match stream {
                    Ok(stream) => {
                        let store = self.store.clone();
                        thread::spawn(move || {
                            if let Err(e) = serve_connection(&store, stream) {
                                warn!(target: "respcheck::store", error = %e, "Connection failed");
                            }
                        });
                    }
                    Err(e) => {
                        warn!(target: "respcheck::store", error = %e, "Accept failed");
                    }
                }
            }
        })
    }
}

/// Serve requests on `stream` until the client closes it.
///
/// Requests must be RESP arrays of bulk strings. Anything else is answered
/// with a protocol error and the connection is closed.
pub fn serve_connection(store: &Executor, stream: TcpStream) -> io::Result<()> {
    let mut writer = stream.try_clone()?;
    let mut reader = ReplyReader::new(stream);

    loop {
        let request = match reader.read_reply("request") {
            Ok(request) => request,
            Err(HarnessError::Transport { .. }) => return Ok(()),
            Err(e) => {
                let reply = Reply::error(format!("ERR Protocol error: {}", e));
                writer.write_all(&encode_reply(&reply))?;
                return Ok(());
            }
        };

        let reply = match request_args(request) {
            Some(args) => store.execute_args(&args),
            None => {
                let reply = Reply::error("ERR Protocol error: expected array of bulk strings");
                writer.write_all(&encode_reply(&reply))?;
                return Ok(());
            }
        };
        writer.write_all(&encode_reply(&reply))?;
    }
}

fn request_args(request: Reply) -> Option<Vec<String>> {
    match request {
        Reply::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Reply::Text(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}
