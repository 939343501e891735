//! RESP reply decoding
//!
//! The leading marker byte decides the variant:
//!
//! | Marker | Variant |
//! |--------|---------|
//! | `+` | `Status` |
//! | `-` | `Error` |
//! | `:` | `Integer` |
//! | `$` | `Text`, or `Bytes` if not UTF-8 (`$-1` is `Nil`) |
//! | `*` | `Array` (`*-1` is `Nil`) |
//! | `_` | `Nil` (RESP3 null) |
//!
//! Anything else is a decode error carrying the raw bytes. Payloads are kept
//! verbatim, error-code prefix included.
//!
//! [`parse`] works on a buffer that may hold an incomplete frame and reports
//! how many bytes one complete reply used, so [`ReplyReader`] can decode from
//! a stream regardless of how the transport splits it. An incomplete parse
//! also records how long the buffer must grow before a retry can succeed, so
//! a large bulk payload is parsed once rather than once per read. Arrays of
//! many small elements are still re-parsed from their start on every read.

use std::cell::Cell;
use std::io::Read;

use respcheck_core::{Error, Reply, Result};

/// Deepest array nesting accepted before the reply is treated as malformed.
pub const MAX_DEPTH: usize = 32;

/// Largest bulk payload accepted (the RESP default `proto-max-bulk-len`).
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

const READ_CHUNK: usize = 4096;

/// Decode exactly one complete reply from `raw`.
///
/// # Errors
///
/// Returns [`Error::Decode`] if `raw` is malformed, incomplete, or has bytes
/// left over after the reply.
pub fn decode(raw: &[u8]) -> Result<Reply> {
    match parse(raw)? {
        Some((reply, used)) if used == raw.len() => Ok(reply),
        Some((_, used)) => Err(Error::decode(
            raw,
            format!("{} trailing byte(s) after reply", raw.len() - used),
        )),
        None => Err(Error::decode(raw, "incomplete reply")),
    }
}

/// Try to parse one reply from the front of `buf`.
///
/// Returns `Ok(None)` when `buf` holds only a prefix of a reply, and
/// `Ok(Some((reply, consumed)))` once a full reply is available.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the bytes cannot be a valid reply.
pub fn parse(buf: &[u8]) -> Result<Option<(Reply, usize)>> {
    parse_hinted(buf).map(|(parsed, _)| parsed)
}

/// [`parse`], plus the buffer length below which another attempt is
/// certain to come up short again.
fn parse_hinted(buf: &[u8]) -> Result<(Option<(Reply, usize)>, usize)> {
    let parser = Parser {
        buf,
        need: Cell::new(0),
    };
    let parsed = parser.reply(0, 0)?;
    Ok((parsed, parser.need.get()))
}

struct Parser<'a> {
    buf: &'a [u8],
    need: Cell<usize>,
}

impl<'a> Parser<'a> {
    fn reply(&self, pos: usize, depth: usize) -> Result<Option<(Reply, usize)>> {
        let (line, next) = match self.line(pos) {
            Some(found) => found,
            None => {
                self.wait_for(self.buf.len() + 1);
                return Ok(None);
            }
        };
        let (marker, payload) = match line.split_first() {
            Some((marker, payload)) => (*marker, payload),
            None => return Err(self.malformed("empty reply line")),
        };

        match marker {
            b'+' => Ok(Some((Reply::Status(self.utf8(payload)?), next))),
            b'-' => Ok(Some((Reply::Error(self.utf8(payload)?), next))),
            b':' => Ok(Some((Reply::Integer(self.integer(payload)?), next))),
            b'_' if payload.is_empty() => Ok(Some((Reply::Nil, next))),
            b'$' => self.bulk(payload, next),
            b'*' => self.array(payload, next, depth),
            other => Err(self.malformed(format!(
                "unknown reply marker '{}'",
                other.escape_ascii()
            ))),
        }
    }

    fn bulk(&self, header: &[u8], start: usize) -> Result<Option<(Reply, usize)>> {
        let len = self.integer(header)?;
        if len == -1 {
            return Ok(Some((Reply::Nil, start)));
        }
        let len = usize::try_from(len)
            .map_err(|_| self.malformed(format!("negative bulk length {}", len)))?;
        if len > MAX_BULK_LEN {
            return Err(self.malformed(format!("bulk length {} exceeds limit", len)));
        }

        let end = start + len;
        if self.buf.len() < end + 2 {
            self.wait_for(end + 2);
            return Ok(None);
        }
        if &self.buf[end..end + 2] != b"\r\n" {
            return Err(self.malformed("bulk payload not terminated by CRLF"));
        }
        let payload = self.buf[start..end].to_vec();
        let reply = match String::from_utf8(payload) {
            Ok(text) => Reply::Text(text),
            Err(e) => Reply::Bytes(e.into_bytes()),
        };
        Ok(Some((reply, end + 2)))
    }

    fn array(&self, header: &[u8], start: usize, depth: usize) -> Result<Option<(Reply, usize)>> {
        let count = self.integer(header)?;
        if count == -1 {
            return Ok(Some((Reply::Nil, start)));
        }
        let count = usize::try_from(count)
            .map_err(|_| self.malformed(format!("negative array length {}", count)))?;
        if depth >= MAX_DEPTH {
            return Err(self.malformed(format!("array nesting deeper than {}", MAX_DEPTH)));
        }

        // Not pre-allocated: `count` comes off the wire.
        let mut items = Vec::new();
        let mut pos = start;
        for _ in 0..count {
            match self.reply(pos, depth + 1)? {
                Some((item, next)) => {
                    items.push(item);
                    pos = next;
                }
                None => return Ok(None),
            }
        }
        Ok(Some((Reply::Array(items), pos)))
    }

    /// Line starting at `pos` without its CRLF, and the offset after the CRLF.
    fn line(&self, pos: usize) -> Option<(&'a [u8], usize)> {
        let rest = self.buf.get(pos..)?;
        let idx = rest.windows(2).position(|w| w == b"\r\n")?;
        Some((&rest[..idx], pos + idx + 2))
    }

    fn wait_for(&self, len: usize) {
        self.need.set(self.need.get().max(len));
    }

    fn integer(&self, digits: &[u8]) -> Result<i64> {
        std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| {
                self.malformed(format!("invalid integer '{}'", digits.escape_ascii()))
            })
    }

    fn utf8(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|_| self.malformed("payload is not valid UTF-8"))
    }

    fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::decode(self.buf, reason)
    }
}

/// Decodes replies from a byte stream.
///
/// Bytes read past the end of one reply are kept for the next call.
pub struct ReplyReader<R> {
    inner: R,
    buf: Vec<u8>,
    /// Buffer length required before parsing is worth retrying.
    need: usize,
}

impl<R: Read> ReplyReader<R> {
    /// Wrap a readable stream
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            need: 0,
        }
    }

    /// Block until one full reply has been read.
    ///
    /// `command` names the in-flight request in transport errors.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if the stream fails or closes mid-reply
    /// - [`Error::Decode`] if the received bytes are malformed; everything
    ///   buffered is discarded, so the next call starts on fresh bytes
    pub fn read_reply(&mut self, command: &str) -> Result<Reply> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if self.buf.len() >= self.need {
                match parse_hinted(&self.buf) {
                    Ok((Some((reply, used)), _)) => {
                        self.buf.drain(..used);
                        self.need = 0;
                        return Ok(reply);
                    }
                    Ok((None, need)) => self.need = need,
                    Err(e) => {
                        self.buf.clear();
                        self.need = 0;
                        return Err(e);
                    }
                }
            }

            let n = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::transport(command, e)),
            };
            if n == 0 {
                let reason = if self.buf.is_empty() {
                    "connection closed by peer".to_string()
                } else {
                    format!(
                        "connection closed by peer after {} byte(s) of a reply",
                        self.buf.len()
                    )
                };
                return Err(Error::transport(command, reason));
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }

    /// Bytes received but not yet decoded
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }
}
