//! Declarative suites loaded from TOML
//!
//! A suite file names a group of cases and lists them in run order. The three
//! per-case sequences mirror [`Case::from_parts`]; `delays_ms` may be omitted,
//! in which case every step runs without delay.
//!
//! ```toml
//! name = "HSTRLEN"
//!
//! [[case]]
//! name = "HSTRLEN with non-hash"
//! cmds = ["SET string_key string_value", "HSTRLEN string_key field"]
//! expect = [
//!     { status = "OK" },
//!     { error = "WRONGTYPE Operation against a key holding the wrong kind of value" },
//! ]
//! delays_ms = [0, 0]
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::case::Case;
use crate::error::{Error, Result};
use crate::reply::Reply;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SuiteFile {
    name: String,
    #[serde(default, rename = "case")]
    cases: Vec<CaseFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseFile {
    name: String,
    cmds: Vec<String>,
    expect: Vec<Reply>,
    #[serde(default)]
    delays_ms: Option<Vec<u64>>,
}

impl CaseFile {
    fn into_case(self) -> Result<Case> {
        let delays = match self.delays_ms {
            Some(ms) => ms.into_iter().map(Duration::from_millis).collect(),
            None => vec![Duration::ZERO; self.cmds.len()],
        };
        Case::from_parts(self.name, self.cmds, self.expect, delays)
    }
}

/// A named, ordered group of cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    name: String,
    cases: Vec<Case>,
}

impl Suite {
    /// Create a suite from already-built cases
    pub fn new(name: impl Into<String>, cases: Vec<Case>) -> Self {
        Suite {
            name: name.into(),
            cases,
        }
    }

    /// Parse a suite from TOML text, validating every case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed TOML and [`Error::InvalidCase`]
    /// when a case's sequences differ in length.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SuiteFile = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse suite: {}", e)))?;

        let cases = file
            .cases
            .into_iter()
            .map(CaseFile::into_case)
            .collect::<Result<Vec<_>>>()?;

        Ok(Suite {
            name: file.name,
            cases,
        })
    }

    /// Read and parse a suite file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, plus every error
    /// [`Suite::from_toml_str`] can return.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read suite file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Suite name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cases in run order
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }
}
