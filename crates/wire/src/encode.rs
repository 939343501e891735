//! RESP encoding
//!
//! Requests are always sent as an array of bulk strings, which every RESP
//! server accepts regardless of argument content. Replies are encoded with
//! the marker matching their variant; the fake store uses this to answer
//! over a socket.

use respcheck_core::Reply;

/// Encode arguments as a RESP array of bulk strings.
pub fn encode_command<S: AsRef<str>>(args: &[S]) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + args.iter().map(|a| a.as_ref().len() + 16).sum::<usize>());
    out.extend_from_slice(format!("*{}\r\n", args.len()).as_bytes());
    for arg in args {
        write_bulk(&mut out, arg.as_ref().as_bytes());
    }
    out
}

/// Encode a reply into a fresh buffer.
pub fn encode_reply(reply: &Reply) -> Vec<u8> {
    let mut out = Vec::new();
    write_reply(&mut out, reply);
    out
}

/// Append the RESP encoding of `reply` to `out`.
///
/// Status and error payloads are single-line by definition; any CR or LF in
/// them is replaced by a space.
pub fn write_reply(out: &mut Vec<u8>, reply: &Reply) {
    match reply {
        Reply::Integer(i) => out.extend_from_slice(format!(":{}\r\n", i).as_bytes()),
        Reply::Text(s) => write_bulk(out, s.as_bytes()),
        Reply::Bytes(b) => write_bulk(out, b),
        Reply::Status(s) => write_line(out, b'+', s),
        Reply::Error(s) => write_line(out, b'-', s),
        Reply::Nil => out.extend_from_slice(b"$-1\r\n"),
        Reply::Array(items) => {
            out.extend_from_slice(format!("*{}\r\n", items.len()).as_bytes());
            for item in items {
                write_reply(out, item);
            }
        }
    }
}

fn write_bulk(out: &mut Vec<u8>, payload: &[u8]) {
    out.extend_from_slice(format!("${}\r\n", payload.len()).as_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(b"\r\n");
}

fn write_line(out: &mut Vec<u8>, marker: u8, s: &str) {
    out.push(marker);
    out.extend(s.bytes().map(|b| if b == b'\r' || b == b'\n' { b' ' } else { b }));
    out.extend_from_slice(b"\r\n");
}
