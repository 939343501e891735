//! Command line tokenization
//!
//! Splits a command line such as `HSET k f "hello world"` into protocol
//! arguments. Rules:
//! 1. Unquoted whitespace separates arguments
//! 2. `"..."` groups an argument; `\"`, `\\`, `\n`, `\r`, `\t` are escapes
//! 3. `'...'` groups an argument literally; only `\'` is an escape
//! 4. Quoted and unquoted runs with no whitespace between them join
//!    (`a"b c"` is one argument `ab c`)
//! 5. `""` is an empty argument

use respcheck_core::{Error, Result};

/// Tokenize a command line into arguments.
///
/// # Errors
///
/// Returns [`Error::InvalidCommand`] on an unterminated quote.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    // Distinguishes `""` (an empty argument) from no argument at all
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_token = true;
                read_double_quoted(line, &mut chars, &mut current)?;
            }
            '\'' => {
                in_token = true;
                read_single_quoted(line, &mut chars, &mut current)?;
            }
            c if c.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        args.push(current);
    }
    Ok(args)
}

fn read_double_quoted(
    line: &str,
    chars: &mut std::str::Chars<'_>,
    out: &mut String,
) -> Result<()> {
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(()),
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => break,
            },
            c => out.push(c),
        }
    }
    Err(unterminated(line, '"'))
}

fn read_single_quoted(
    line: &str,
    chars: &mut std::str::Chars<'_>,
    out: &mut String,
) -> Result<()> {
    while let Some(c) = chars.next() {
        match c {
            '\'' => return Ok(()),
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => break,
            },
            c => out.push(c),
        }
    }
    Err(unterminated(line, '\''))
}

fn unterminated(line: &str, quote: char) -> Error {
    Error::InvalidCommand {
        command: line.to_string(),
        reason: format!("unterminated {} quote", quote),
    }
}
