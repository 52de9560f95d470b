//! Error types for schema validation.
//!
//! Two tiers exist and never mix:
//!
//! - [`ConfigError`]: programmer or input mistakes caught at schema-parse or
//!   constraint-construction time. Surfaced immediately, never retried.
//! - [`ValidationError`]: data-quality findings raised by
//!   `SchemaValidator::validate` when any check failed. The non-raising
//!   twin (`check`) returns the same outcomes as a `ValidationResult`
//!   instead.

use crate::outcome::{CheckOutcome, ValidationResult};
use thiserror::Error;

/// Configuration-tier errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A constraint kind was declared without any of its required parameters
    #[error("{kind} constraint requires {expected}")]
    MissingParameter {
        /// Constraint kind tag
        kind: String,
        /// Description of what was expected
        expected: String,
    },

    /// Percentile outside the valid range
    #[error("percentile must be between 0.0 and 1.0, got {0}")]
    PercentileOutOfRange(f64),

    /// value_set declared with an empty allowed list
    #[error("value_set constraint requires at least one allowed value")]
    EmptyAllowedValues,

    /// value_set declared with a non-scalar allowed value
    #[error("allowed value for column '{column}' must be a scalar, got {found}")]
    NonScalarAllowedValue {
        /// Column the constraint applies to
        column: String,
        /// JSON type of the offending value
        found: String,
    },

    /// regex_pattern declared with a pattern that does not compile
    #[error("invalid regex pattern '{pattern}': {reason}")]
    InvalidRegex {
        /// The offending pattern
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },

    /// A declared field type resolves to no known type or alias
    #[error("unknown type name '{type_name}' for field '{field}'")]
    UnknownTypeName {
        /// Field name
        field: String,
        /// The unrecognized type name
        type_name: String,
    },
}

impl ConfigError {
    /// Creates a missing-parameter error.
    pub fn missing_parameter(kind: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::MissingParameter {
            kind: kind.into(),
            expected: expected.into(),
        }
    }

    /// Creates an invalid-regex error.
    pub fn invalid_regex(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

/// Raised by the validator when a validation pass has failing outcomes.
///
/// Carries the failing outcomes in reporting order (type failures first,
/// then constraint failures) and a pre-composed message enumerating each.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationError {
    failures: Vec<CheckOutcome>,
    message: String,
}

impl ValidationError {
    /// Builds the error from the failing outcomes of a result.
    pub fn from_result(result: ValidationResult) -> Self {
        let (type_failures, constraint_failures) = result.into_failures();
        Self::new(type_failures, constraint_failures)
    }

    /// Builds the error from separate type and constraint failure lists.
    pub fn new(type_failures: Vec<CheckOutcome>, constraint_failures: Vec<CheckOutcome>) -> Self {
        let total = type_failures.len() + constraint_failures.len();
        let mut lines = vec![format!("Validation failed with {total} error(s)")];

        if !type_failures.is_empty() {
            lines.push("Type errors:".to_string());
            for outcome in &type_failures {
                lines.push(format!("  - {}: {}", outcome.check, outcome.message));
            }
        }

        if !constraint_failures.is_empty() {
            lines.push("Failed constraints:".to_string());
            for outcome in &constraint_failures {
                lines.push(format!("  - {}: {}", outcome.check, outcome.message));
            }
        }

        let mut failures = type_failures;
        failures.extend(constraint_failures);

        Self {
            failures,
            message: lines.join("\n"),
        }
    }

    /// The failing outcomes, type failures before constraint failures.
    pub fn failures(&self) -> &[CheckOutcome] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Details;

    #[test]
    fn test_message_enumerates_both_tiers() {
        let err = ValidationError::new(
            vec![CheckOutcome::fail(
                "field_type(user_id)",
                "Type mismatch for field 'user_id': expected Int64, found String",
                Details::new(),
            )],
            vec![CheckOutcome::fail(
                "maximum_value(age)",
                "Maximum value 150 exceeds limit 120",
                Details::new(),
            )],
        );

        let message = err.to_string();
        assert!(message.starts_with("Validation failed with 2 error(s)"));
        assert!(message.contains("Type errors:"));
        assert!(message.contains("field_type(user_id)"));
        assert!(message.contains("Failed constraints:"));
        assert!(message.contains("Maximum value 150 exceeds limit 120"));
        assert_eq!(err.failures().len(), 2);
    }

    #[test]
    fn test_constraint_only_failures_skip_type_section() {
        let err = ValidationError::new(
            Vec::new(),
            vec![CheckOutcome::fail("row_count", "too small", Details::new())],
        );

        let message = err.to_string();
        assert!(!message.contains("Type errors:"));
        assert!(message.contains("Failed constraints:"));
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::missing_parameter(
            "nullability",
            "at least one of 'max_null_ratio' or 'max_null_count'",
        );
        assert_eq!(
            err.to_string(),
            "nullability constraint requires at least one of 'max_null_ratio' or 'max_null_count'"
        );

        let err = ConfigError::PercentileOutOfRange(1.5);
        assert!(err.to_string().contains("between 0.0 and 1.0"));
    }
}
