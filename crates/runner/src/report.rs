//! Run reports
//!
//! A [`CaseReport`] holds every step outcome of one case plus the structural
//! error that ended it early, if any. A [`GroupReport`] aggregates the cases
//! of a group. Both render the divergences as command / expected / actual and
//! can be turned into an [`Error`] for a test framework via `ensure_passed()`.

use std::fmt;

use respcheck_core::{Error, Result};

use crate::assert::StepOutcome;

/// Outcome of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    /// Case name
    pub name: String,
    /// Number of steps the case declares
    pub total_steps: usize,
    /// Outcomes of the steps that ran, in order
    pub outcomes: Vec<StepOutcome>,
    /// Structural failure that ended the case before its last step
    pub fatal: Option<Error>,
}

impl CaseReport {
    /// Whether every declared step ran and matched.
    pub fn passed(&self) -> bool {
        self.fatal.is_none()
            && self.outcomes.len() == self.total_steps
            && self.outcomes.iter().all(StepOutcome::matched)
    }

    /// Steps whose reply diverged.
    pub fn mismatches(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| !o.matched())
    }

    /// Number of steps whose reply diverged.
    pub fn mismatch_count(&self) -> usize {
        self.mismatches().count()
    }

    /// Convert a failing report into an error.
    ///
    /// A structural failure wins over divergences, since later steps never
    /// ran.
    pub fn ensure_passed(&self) -> Result<()> {
        if let Some(fatal) = &self.fatal {
            return Err(fatal.clone());
        }
        let mismatches = self.mismatch_count();
        if mismatches > 0 {
            return Err(Error::AssertionMismatch {
                case: self.name.clone(),
                mismatches,
                detail: self.divergences(),
            });
        }
        Ok(())
    }

    fn divergences(&self) -> String {
        let mut out = String::new();
        for outcome in self.mismatches() {
            out.push_str(&format!(
                "  step {}: {}\n    expected: {}\n    actual:   {}\n",
                outcome.step + 1,
                outcome.command,
                indent(&outcome.expected.to_string()),
                indent(&outcome.actual.to_string()),
            ));
        }
        out
    }
}

// Continuation lines of multi-line replies (arrays) line up under the value.
fn indent(rendered: &str) -> String {
    rendered.replace('\n', "\n              ")
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed() { "ok" } else { "FAILED" };
        writeln!(
            f,
            "case '{}': {} ({}/{} steps run, {} mismatch(es))",
            self.name,
            verdict,
            self.outcomes.len(),
            self.total_steps,
            self.mismatch_count()
        )?;
        f.write_str(&self.divergences())?;
        if let Some(fatal) = &self.fatal {
            writeln!(f, "  aborted: {}", fatal)?;
        }
        Ok(())
    }
}

/// Outcome of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    /// Group name
    pub name: String,
    /// One report per case, in run order
    pub cases: Vec<CaseReport>,
}

impl GroupReport {
    /// Whether every case passed.
    pub fn passed(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }

    /// Cases that did not pass.
    pub fn failed_cases(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|c| !c.passed())
    }

    /// Total steps that ran across all cases.
    pub fn steps_run(&self) -> usize {
        self.cases.iter().map(|c| c.outcomes.len()).sum()
    }

    /// Total divergent steps across all cases.
    pub fn mismatch_count(&self) -> usize {
        self.cases.iter().map(CaseReport::mismatch_count).sum()
    }

    /// Convert a failing report into an error.
    ///
    /// The first structural failure is returned as is. Otherwise all
    /// divergences are folded into one [`Error::AssertionMismatch`].
    pub fn ensure_passed(&self) -> Result<()> {
        if let Some(fatal) = self.cases.iter().find_map(|c| c.fatal.as_ref()) {
            return Err(fatal.clone());
        }
        let failed: Vec<&CaseReport> = self.failed_cases().collect();
        if failed.is_empty() {
            return Ok(());
        }
        Err(Error::AssertionMismatch {
            case: failed
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            mismatches: self.mismatch_count(),
            detail: failed.iter().map(|c| c.to_string()).collect(),
        })
    }
}

impl fmt::Display for GroupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failed_cases().count();
        writeln!(
            f,
            "group '{}': {} case(s), {} passed, {} failed",
            self.name,
            self.cases.len(),
            self.cases.len() - failed,
            failed
        )?;
        for case in &self.cases {
            write!(f, "{}", case)?;
        }
        Ok(())
    }
}
