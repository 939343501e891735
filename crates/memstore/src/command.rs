//! Command enum defining every operation the fake store understands.
//!
//! Commands are parsed from the argument list of one request. Parsing owns
//! all argument validation (arity, option syntax, integer arguments), so a
//! `Command` that exists is always executable; only type and existence checks
//! remain for the handlers.
//!
//! Arity follows the RESP convention: a positive arity is an exact argument
//! count including the verb, a negative arity `-n` means "at least n".

use std::time::Duration;

use crate::error::Error;

/// A parsed request.
///
/// # Command Categories
///
/// | Category | Commands |
/// |----------|----------|
/// | Connection | `PING`, `ECHO` |
/// | Keyspace | `FLUSHDB`, `DEL`, `EXISTS`, `EXPIRE`, `TTL` |
/// | String | `SET`, `GET` |
/// | Hash | `HSET`, `HGET`, `HDEL`, `HLEN`, `HEXISTS`, `HSTRLEN`, `HGETALL` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ==================== Connection ====================
    /// `PING [message]`
    Ping {
        /// Echoed back as a bulk string when present
        message: Option<String>,
    },
    /// `ECHO message`
    Echo {
        /// Text to echo
        message: String,
    },

    // ==================== Keyspace ====================
    /// `FLUSHDB [ASYNC|SYNC]`
    FlushDb,
    /// `DEL key [key ...]`
    Del {
        /// Keys to remove
        keys: Vec<String>,
    },
    /// `EXISTS key [key ...]`
    Exists {
        /// Keys to count (repeats count repeatedly)
        keys: Vec<String>,
    },
    /// `EXPIRE key seconds`
    Expire {
        /// Target key
        key: String,
        /// Seconds to live; non-positive deletes the key
        seconds: i64,
    },
    /// `TTL key`
    Ttl {
        /// Target key
        key: String,
    },

    // ==================== String ====================
    /// `SET key value [EX seconds | PX milliseconds]`
    Set {
        /// Target key
        key: String,
        /// Value to store
        value: String,
        /// Optional time to live
        ttl: Option<Duration>,
    },
    /// `GET key`
    Get {
        /// Target key
        key: String,
    },

    // ==================== Hash ====================
    /// `HSET key field value [field value ...]`
    HSet {
        /// Target key
        key: String,
        /// Field/value pairs in argument order
        pairs: Vec<(String, String)>,
    },
    /// `HGET key field`
    HGet {
        /// Target key
        key: String,
        /// Field to read
        field: String,
    },
    /// `HDEL key field [field ...]`
    HDel {
        /// Target key
        key: String,
        /// Fields to remove
        fields: Vec<String>,
    },
    /// `HLEN key`
    HLen {
        /// Target key
        key: String,
    },
    /// `HEXISTS key field`
    HExists {
        /// Target key
        key: String,
        /// Field to test
        field: String,
    },
    /// `HSTRLEN key field`
    HStrLen {
        /// Target key
        key: String,
        /// Field whose value length is returned
        field: String,
    },
    /// `HGETALL key`
    HGetAll {
        /// Target key
        key: String,
    },
}

fn check_arity(verb: &str, arity: i32, argc: usize) -> Result<(), Error> {
    let ok = if arity >= 0 {
        argc == arity as usize
    } else {
        argc >= arity.unsigned_abs() as usize
    };
    if ok {
        Ok(())
    } else {
        Err(Error::arity(verb))
    }
}

fn parse_i64(s: &str) -> Result<i64, Error> {
    s.parse::<i64>().map_err(|_| Error::NotAnInteger)
}

impl Command {
    /// Parse a request's argument list (verb first).
    ///
    /// # Errors
    ///
    /// Returns the error reply the store must answer with when the request
    /// is not a valid command.
    pub fn parse(args: &[String]) -> Result<Command, Error> {
        let verb = args.first().ok_or(Error::EmptyCommand)?;
        let argc = args.len();
        let upper = verb.to_ascii_uppercase();
        let arg = |i: usize| args[i].clone();

        let cmd = match upper.as_str() {
            "PING" => {
                if argc > 2 {
                    return Err(Error::arity(verb));
                }
                Command::Ping {
                    message: args.get(1).cloned(),
                }
            }
            "ECHO" => {
                check_arity(verb, 2, argc)?;
                Command::Echo { message: arg(1) }
            }
            "FLUSHDB" => {
                match args.get(1).map(|s| s.to_ascii_uppercase()) {
                    None => {}
                    Some(mode) if argc == 2 && (mode == "ASYNC" || mode == "SYNC") => {}
                    Some(_) if argc > 2 => return Err(Error::arity(verb)),
                    Some(_) => return Err(Error::Syntax),
                }
                Command::FlushDb
            }
            "DEL" => {
                check_arity(verb, -2, argc)?;
                Command::Del {
                    keys: args[1..].to_vec(),
                }
            }
            "EXISTS" => {
                check_arity(verb, -2, argc)?;
                Command::Exists {
                    keys: args[1..].to_vec(),
                }
            }
            "EXPIRE" => {
                check_arity(verb, 3, argc)?;
                Command::Expire {
                    key: arg(1),
                    seconds: parse_i64(&args[2])?,
                }
            }
            "TTL" => {
                check_arity(verb, 2, argc)?;
                Command::Ttl { key: arg(1) }
            }
            "SET" => {
                check_arity(verb, -3, argc)?;
                Command::Set {
                    key: arg(1),
                    value: arg(2),
                    ttl: parse_set_options(&args[3..])?,
                }
            }
            "GET" => {
                check_arity(verb, 2, argc)?;
                Command::Get { key: arg(1) }
            }
            "HSET" => {
                check_arity(verb, -4, argc)?;
                if argc % 2 != 0 {
                    return Err(Error::arity(verb));
                }
                let pairs = args[2..]
                    .chunks_exact(2)
                    .map(|pair| (pair[0].clone(), pair[1].clone()))
                    .collect();
                Command::HSet { key: arg(1), pairs }
            }
            "HGET" => {
                check_arity(verb, 3, argc)?;
                Command::HGet {
                    key: arg(1),
                    field: arg(2),
                }
            }
            "HDEL" => {
                check_arity(verb, -3, argc)?;
                Command::HDel {
                    key: arg(1),
                    fields: args[2..].to_vec(),
                }
            }
            "HLEN" => {
                check_arity(verb, 2, argc)?;
                Command::HLen { key: arg(1) }
            }
            "HEXISTS" => {
                check_arity(verb, 3, argc)?;
                Command::HExists {
                    key: arg(1),
                    field: arg(2),
                }
            }
            "HSTRLEN" => {
                check_arity(verb, 3, argc)?;
                Command::HStrLen {
                    key: arg(1),
                    field: arg(2),
                }
            }
            "HGETALL" => {
                check_arity(verb, 2, argc)?;
                Command::HGetAll { key: arg(1) }
            }
            _ => {
                return Err(Error::UnknownCommand {
                    verb: verb.clone(),
                })
            }
        };
        Ok(cmd)
    }

    /// Canonical lower-case command name
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping { .. } => "ping",
            Command::Echo { .. } => "echo",
            Command::FlushDb => "flushdb",
            Command::Del { .. } => "del",
            Command::Exists { .. } => "exists",
            Command::Expire { .. } => "expire",
            Command::Ttl { .. } => "ttl",
            Command::Set { .. } => "set",
            Command::Get { .. } => "get",
            Command::HSet { .. } => "hset",
            Command::HGet { .. } => "hget",
            Command::HDel { .. } => "hdel",
            Command::HLen { .. } => "hlen",
            Command::HExists { .. } => "hexists",
            Command::HStrLen { .. } => "hstrlen",
            Command::HGetAll { .. } => "hgetall",
        }
    }
}

/// `SET` options after key and value: at most one of `EX n` / `PX n`.
fn parse_set_options(opts: &[String]) -> Result<Option<Duration>, Error> {
    let mut ttl = None;
    let mut i = 0;
    while i < opts.len() {
        let opt = opts[i].to_ascii_uppercase();
        let millis_per_unit: u64 = match opt.as_str() {
            "EX" => 1000,
            "PX" => 1,
            _ => return Err(Error::Syntax),
        };
        if ttl.is_some() {
            return Err(Error::Syntax);
        }
        let amount = opts.get(i + 1).ok_or(Error::Syntax)?;
        let amount = parse_i64(amount)?;
        let invalid = || Error::InvalidExpire { verb: "set".into() };
        if amount <= 0 {
            return Err(invalid());
        }
        let millis = (amount as u64)
            .checked_mul(millis_per_unit)
            .ok_or_else(invalid)?;
        ttl = Some(Duration::from_millis(millis));
        i += 2;
    }
    Ok(ttl)
}
