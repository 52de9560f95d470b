//! Validation outcome types.
//!
//! Every type check and every constraint evaluation produces one
//! [`CheckOutcome`]; a full validation pass collects them into a
//! [`ValidationResult`]. Outcomes are never short-circuited: a single pass
//! surfaces every failing check, not just the first.

use serde::Serialize;

/// Diagnostic detail attached to an outcome, keyed by aggregate name.
pub type Details = serde_json::Map<String, serde_json::Value>;

/// The structured result of one type check or one constraint evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    /// Identity of the check, e.g. `maximum_value(age)` or `field_type(age)`
    pub check: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable description of the result
    pub message: String,

    /// Computed aggregates and configured limits
    pub details: Details,
}

impl CheckOutcome {
    /// Creates a passing outcome.
    pub fn pass(check: impl Into<String>, message: impl Into<String>, details: Details) -> Self {
        Self {
            check: check.into(),
            passed: true,
            message: message.into(),
            details,
        }
    }

    /// Creates a failing outcome.
    pub fn fail(check: impl Into<String>, message: impl Into<String>, details: Details) -> Self {
        Self {
            check: check.into(),
            passed: false,
            message: message.into(),
            details,
        }
    }
}

/// Aggregated outcomes of one validation pass.
///
/// Type outcomes come first (one per declared field, in schema order),
/// followed by constraint outcomes (in declaration order). The result is
/// created fresh per validation call and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    passed: bool,
    type_outcomes: Vec<CheckOutcome>,
    constraint_outcomes: Vec<CheckOutcome>,
}

impl ValidationResult {
    /// Builds a result from the two outcome lists.
    pub fn new(type_outcomes: Vec<CheckOutcome>, constraint_outcomes: Vec<CheckOutcome>) -> Self {
        let passed = type_outcomes.iter().all(|o| o.passed)
            && constraint_outcomes.iter().all(|o| o.passed);
        Self {
            passed,
            type_outcomes,
            constraint_outcomes,
        }
    }

    /// True iff every outcome (type and constraint) passed.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Outcomes of the field type checks, in schema order.
    pub fn type_outcomes(&self) -> &[CheckOutcome] {
        &self.type_outcomes
    }

    /// Outcomes of the constraint evaluations, in declaration order.
    pub fn constraint_outcomes(&self) -> &[CheckOutcome] {
        &self.constraint_outcomes
    }

    /// All outcomes: type checks first, then constraints.
    pub fn outcomes(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.type_outcomes.iter().chain(self.constraint_outcomes.iter())
    }

    /// Only the failing outcomes, type failures before constraint failures.
    pub fn failures(&self) -> Vec<&CheckOutcome> {
        self.outcomes().filter(|o| !o.passed).collect()
    }

    /// Consumes the result, returning the failing type and constraint
    /// outcomes as separate lists.
    pub fn into_failures(self) -> (Vec<CheckOutcome>, Vec<CheckOutcome>) {
        let type_failures = self
            .type_outcomes
            .into_iter()
            .filter(|o| !o.passed)
            .collect();
        let constraint_failures = self
            .constraint_outcomes
            .into_iter()
            .filter(|o| !o.passed)
            .collect();
        (type_failures, constraint_failures)
    }

    /// Total number of checks performed.
    pub fn total_checks(&self) -> usize {
        self.type_outcomes.len() + self.constraint_outcomes.len()
    }

    /// Number of passing checks.
    pub fn passed_checks(&self) -> usize {
        self.outcomes().filter(|o| o.passed).count()
    }

    /// Number of failing checks.
    pub fn failed_checks(&self) -> usize {
        self.outcomes().filter(|o| !o.passed).count()
    }

    /// Multi-line human-readable summary of the pass.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!(
                "Validation {}",
                if self.passed { "PASSED" } else { "FAILED" }
            ),
            format!("Total checks: {}", self.total_checks()),
            format!("Passed: {}", self.passed_checks()),
            format!("Failed: {}", self.failed_checks()),
        ];

        if !self.passed {
            lines.push(String::new());
            lines.push("Failed checks:".to_string());
            for outcome in self.failures() {
                lines.push(format!("  - {}: {}", outcome.check, outcome.message));
            }
        }

        lines.join("\n")
    }
}
