//! Harness configuration
//!
//! The only thing the harness needs from its environment is where the store
//! lives and how long to wait for it. Settings come from, in order of
//! precedence:
//! 1. `RESPCHECK_ADDR` environment variable (address only)
//! 2. a `respcheck.toml` file, when one is loaded with
//!    [`HarnessConfig::from_file`]
//! 3. built-in defaults

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable overriding the store address.
pub const ADDR_ENV: &str = "RESPCHECK_ADDR";

/// Config file name conventionally placed next to the suites.
pub const CONFIG_FILE_NAME: &str = "respcheck.toml";

/// Connection settings for a conformance run.
///
/// # Example
///
/// ```toml
/// addr = "127.0.0.1:7379"
/// read_timeout_ms = 5000
/// connect_timeout_ms = 5000
/// reset_command = "FLUSHDB"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// `host:port` of the store under test
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Per-read timeout in milliseconds (0 disables it)
    #[serde(default = "default_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Connect timeout in milliseconds (0 disables it)
    #[serde(default = "default_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Command that clears all store state before a group runs
    #[serde(default = "default_reset_command")]
    pub reset_command: String,
}

fn default_addr() -> String {
    "127.0.0.1:7379".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_reset_command() -> String {
    "FLUSHDB".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            read_timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_timeout_ms(),
            reset_command: default_reset_command(),
        }
    }
}

impl HarnessConfig {
    /// Config for a given address with default timeouts
    pub fn with_addr(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ..Self::default()
        }
    }

    /// Defaults, with the address taken from `RESPCHECK_ADDR` when set.
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Override the address from `RESPCHECK_ADDR` when set and non-empty.
    pub fn apply_env(self) -> Self {
        self.with_addr_override(std::env::var(ADDR_ENV).ok())
    }

    fn with_addr_override(mut self, addr: Option<String>) -> Self {
        if let Some(addr) = addr {
            if !addr.trim().is_empty() {
                self.addr = addr.trim().to_string();
            }
        }
        self
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or an empty address/reset command.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path, then apply `RESPCHECK_ADDR`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::from_toml_str(&content)?.apply_env())
    }

    /// Check that required fields are usable.
    pub fn validate(&self) -> Result<()> {
        if self.addr.trim().is_empty() {
            return Err(Error::config("addr must not be empty"));
        }
        if self.reset_command.trim().is_empty() {
            return Err(Error::config("reset_command must not be empty"));
        }
        Ok(())
    }

    /// Read timeout, `None` when disabled
    pub fn read_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.read_timeout_ms)
    }

    /// Connect timeout, `None` when disabled
    pub fn connect_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.connect_timeout_ms)
    }
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
