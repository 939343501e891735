//! Assertion engine
//!
//! Replies are compared structurally: same variant, same payload. Strings are
//! compared case-sensitively, integers exactly, arrays element by element.
//! A mismatch is recorded and never aborts the case.

use respcheck_core::Reply;
use tracing::warn;

/// Result of checking one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Zero-based position of the step within its case
    pub step: usize,
    /// The command that produced `actual`
    pub command: String,
    /// Reply the case declared
    pub expected: Reply,
    /// Reply the store sent
    pub actual: Reply,
}

impl StepOutcome {
    /// Whether the store answered as declared.
    pub fn matched(&self) -> bool {
        self.actual == self.expected
    }
}

/// Accumulates step outcomes for one case.
#[derive(Debug, Clone, Default)]
pub struct Assertions {
    outcomes: Vec<StepOutcome>,
}

impl Assertions {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `actual` against `expected` and record the outcome under
    /// `context` (the command that was sent). Returns whether they matched.
    pub fn assert(&mut self, actual: Reply, expected: &Reply, context: &str) -> bool {
        let outcome = StepOutcome {
            step: self.outcomes.len(),
            command: context.to_string(),
            expected: expected.clone(),
            actual,
        };
        let matched = outcome.matched();
        if !matched {
            warn!(
                target: "respcheck::runner",
                step = outcome.step,
                command = context,
                expected = %outcome.expected,
                actual = %outcome.actual,
                "Reply mismatch"
            );
        }
        self.outcomes.push(outcome);
        matched
    }

    /// Every recorded outcome, in step order.
    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    /// Number of recorded mismatches.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.matched()).count()
    }

    /// Consume the accumulator.
    pub fn into_outcomes(self) -> Vec<StepOutcome> {
        self.outcomes
    }
}
