//! Case runner
//!
//! Runs cases step by step over a [`CommandChannel`]:
//!
//! 1. The reset command is issued once, before the first case of a group.
//! 2. For each step: sleep for its delay, dispatch its command, hand the
//!    reply to the assertion engine.
//! 3. A mismatch never stops the case. A structural error (transport,
//!    decode, unparseable command, blank case name) ends the current case;
//!    later cases still run. A [`Connection`] closes itself after a failed
//!    exchange, so later cases on it fail with a transport error instead of
//!    reading a stale reply.
//!
//! Cases of a group share one store and are not isolated from each other:
//! a case may observe keys written by an earlier one.

use std::thread;

use respcheck_core::{Case, CommandChannel, Error, HarnessConfig, Reply, Result, Suite};
use tracing::{debug, info};

use crate::assert::Assertions;
use crate::connection::Connection;
use crate::dispatch::fire;
use crate::report::{CaseReport, GroupReport};

/// Drives cases against a store.
#[derive(Debug, Clone, Default)]
pub struct CaseRunner {
    config: HarnessConfig,
}

impl CaseRunner {
    /// Create a runner with the given configuration.
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Issue the reset command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reset`] if the command cannot be exchanged or the
    /// store answers with an error reply.
    pub fn reset<C: CommandChannel + ?Sized>(&self, channel: &mut C) -> Result<()> {
        let command = self.config.reset_command.as_str();
        let failed = |reply: String| Error::Reset {
            command: command.to_string(),
            reply,
        };
        match fire(channel, command) {
            Ok(reply @ Reply::Error(_)) => Err(failed(reply.to_string())),
            Ok(_) => Ok(()),
            Err(e) => Err(failed(e.to_string())),
        }
    }

    /// Run one case to completion (or to its first structural error).
    pub fn run_case<C: CommandChannel + ?Sized>(&self, channel: &mut C, case: &Case) -> CaseReport {
        debug!(target: "respcheck::runner", case = case.name(), steps = case.len(), "Running case");

        let mut assertions = Assertions::new();
        let mut fatal = case.validate().err();
        let steps = if fatal.is_some() { &[][..] } else { case.steps() };
        for step in steps {
            if !step.delay.is_zero() {
                debug!(target: "respcheck::runner", delay_ms = step.delay.as_millis() as u64, "Delaying step");
                thread::sleep(step.delay);
            }
            match fire(channel, &step.command) {
                Ok(actual) => {
                    assertions.assert(actual, &step.expected, &step.command);
                }
                Err(e) => {
                    fatal = Some(e);
                    break;
                }
            }
        }

        let report = CaseReport {
            name: case.name().to_string(),
            total_steps: case.len(),
            outcomes: assertions.into_outcomes(),
            fatal,
        };
        info!(
            target: "respcheck::runner",
            case = case.name(),
            passed = report.passed(),
            mismatches = report.mismatch_count(),
            "Case finished"
        );
        report
    }

    /// Reset the store once, then run `cases` in order.
    ///
    /// # Errors
    ///
    /// Only a failed reset is an error; per-case failures are in the report.
    pub fn run_group<C: CommandChannel + ?Sized>(
        &self,
        channel: &mut C,
        name: &str,
        cases: &[Case],
    ) -> Result<GroupReport> {
        info!(target: "respcheck::runner", group = name, cases = cases.len(), "Running group");
        self.reset(channel)?;

        let cases: Vec<CaseReport> = cases.iter().map(|c| self.run_case(channel, c)).collect();
        let report = GroupReport {
            name: name.to_string(),
            cases,
        };
        info!(
            target: "respcheck::runner",
            group = name,
            passed = report.passed(),
            steps = report.steps_run(),
            mismatches = report.mismatch_count(),
            "Group finished"
        );
        Ok(report)
    }

    /// Run a suite as one group over `channel`.
    pub fn run_suite_on<C: CommandChannel + ?Sized>(
        &self,
        channel: &mut C,
        suite: &Suite,
    ) -> Result<GroupReport> {
        self.run_group(channel, suite.name(), suite.cases())
    }

    /// Run a suite as one group over a fresh connection to the configured
    /// store. The connection is released when the group ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration,
    /// [`Error::Connection`] if the store is unreachable and [`Error::Reset`]
    /// if the reset fails.
    pub fn run_suite(&self, suite: &Suite) -> Result<GroupReport> {
        self.config.validate()?;
        Connection::scoped(&self.config, |conn| self.run_suite_on(conn, suite))
    }
}
