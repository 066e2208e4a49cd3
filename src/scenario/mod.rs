//! Scenario outcomes and reporting
//!
//! A scenario ends in exactly one of three states. Skips are a normal
//! outcome for steps whose prerequisite did not run, distinct from failure.

pub mod assert;
mod report;

use std::time::Duration;

pub use report::{print_header, print_result, print_summary};

/// Final state of one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Skipped { reason: String },
    Failed { error: String },
}

impl Outcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }
}

/// Result of a scenario run
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

impl ScenarioResult {
    /// Fold a scenario's return value into a result; errors become failures
    pub fn from_run(name: &str, run: crate::Result<Outcome>, elapsed: Duration) -> Self {
        let outcome = match run {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Failed {
                error: e.to_string(),
            },
        };
        Self {
            name: name.to_string(),
            outcome,
            elapsed,
        }
    }
}

/// Counts over a batch of results
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(results: &[ScenarioResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            match r.outcome {
                Outcome::Passed => acc.passed += 1,
                Outcome::Skipped { .. } => acc.skipped += 1,
                Outcome::Failed { .. } => acc.failed += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.passed + self.skipped + self.failed
    }

    /// True when nothing failed; skips do not count against a run
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn result(outcome: Outcome) -> ScenarioResult {
        ScenarioResult {
            name: "x".to_string(),
            outcome,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_errors_become_failures() {
        let r = ScenarioResult::from_run(
            "get-user",
            Err(Error::assertion("expected id 2, got 3")),
            Duration::ZERO,
        );
        assert_eq!(r.name, "get-user");
        match r.outcome {
            Outcome::Failed { error } => assert!(error.contains("expected id 2, got 3")),
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_ignores_skips_for_success() {
        let results = vec![
            result(Outcome::Passed),
            result(Outcome::skipped("no id")),
            result(Outcome::Passed),
        ];
        let summary = Summary::of(&results);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total(), 3);
        assert!(summary.success());

        let summary = Summary::of(&[result(Outcome::Failed {
            error: "boom".to_string(),
        })]);
        assert!(!summary.success());
    }
}
