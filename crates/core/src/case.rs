//! Test cases
//!
//! A [`Case`] is a named, ordered sequence of [`Step`]s. Each step pairs one
//! command line with the reply it must produce and an optional delay to wait
//! before sending it.
//!
//! Cases are plain data: they are built before a run and never mutated while
//! it executes. Steps are stored together so the "one command, one expected
//! reply, one delay" invariant holds by construction; the parallel-sequence
//! constructor [`Case::from_parts`] checks it explicitly.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::reply::Reply;

/// One step of a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Command line sent to the store, e.g. `HSTRLEN key field`
    pub command: String,
    /// Reply the store must produce
    pub expected: Reply,
    /// Time to block before sending `command`
    pub delay: Duration,
}

impl Step {
    /// Create a step with no delay
    pub fn new(command: impl Into<String>, expected: Reply) -> Self {
        Step {
            command: command.into(),
            expected,
            delay: Duration::ZERO,
        }
    }
}

/// A named, ordered list of steps.
///
/// # Example
///
/// ```ignore
/// use respcheck_core::{Case, Reply};
///
/// let case = Case::new("HSTRLEN with existing key and field")
///     .step("HSET key_hStrLen3 field HelloWorld", Reply::Integer(1))
///     .step("HSTRLEN key_hStrLen3 field", Reply::Integer(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    name: String,
    steps: Vec<Step>,
}

impl Case {
    /// Create an empty case
    pub fn new(name: impl Into<String>) -> Self {
        Case {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step without delay
    pub fn step(mut self, command: impl Into<String>, expected: Reply) -> Self {
        self.steps.push(Step::new(command, expected));
        self
    }

    /// Append a step that waits `delay` before sending `command`
    pub fn step_after(
        mut self,
        delay: Duration,
        command: impl Into<String>,
        expected: Reply,
    ) -> Self {
        self.steps.push(Step {
            command: command.into(),
            expected,
            delay,
        });
        self
    }

    /// Build a case from three parallel sequences.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCase`] if the name is blank or the sequences
    /// differ in length.
    pub fn from_parts(
        name: impl Into<String>,
        commands: Vec<String>,
        expected: Vec<Reply>,
        delays: Vec<Duration>,
    ) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        if commands.len() != expected.len() || commands.len() != delays.len() {
            return Err(Error::InvalidCase {
                case: name,
                reason: format!(
                    "sequence lengths differ: {} commands, {} expected replies, {} delays",
                    commands.len(),
                    expected.len(),
                    delays.len()
                ),
            });
        }

        let steps = commands
            .into_iter()
            .zip(expected)
            .zip(delays)
            .map(|((command, expected), delay)| Step {
                command,
                expected,
                delay,
            })
            .collect();

        Ok(Case { name, steps })
    }

    /// Check the invariants a builder-made case cannot enforce up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCase`] if the name is blank.
    pub fn validate(&self) -> Result<()> {
        check_name(&self.name)
    }

    /// Case name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the case has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidCase {
            case: name.to_string(),
            reason: "case name is empty".to_string(),
        });
    }
    Ok(())
}
