//! The schema validator.
//!
//! Orchestrates one validation pass: field type checks first (in schema
//! order), then every constraint (in declaration order). Outcomes are always
//! fully collected so a single pass surfaces every failing check. The
//! validator itself is immutable after construction and safe to reuse across
//! calls and threads.

use crate::constraints::Constraint;
use crate::dataset::Dataset;
use crate::types::{check_field_type, DataType};
use datapact_core::{ConfigError, Schema, ValidationError, ValidationResult};
use indexmap::IndexMap;
use tracing::debug;

/// Validator for applying type checks and constraints to datasets.
///
/// # Example
///
/// ```rust
/// use datapact_validator::{Column, Constraint, Dataset, SchemaValidator};
///
/// let dataset = Dataset::from_columns([
///     ("age".to_string(), Column::from(vec![25i64, 42])),
/// ])
/// .unwrap();
///
/// let validator = SchemaValidator::new(vec![
///     Constraint::maximum_value("age", 120.0),
/// ]);
///
/// let result = validator.check(&dataset);
/// assert!(result.passed());
/// ```
#[derive(Debug, Default)]
pub struct SchemaValidator {
    constraints: Vec<Constraint>,
    field_types: IndexMap<String, DataType>,
}

impl SchemaValidator {
    /// Creates a validator from a constraint list, with no declared field
    /// types (type checking is skipped entirely).
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self {
            constraints,
            field_types: IndexMap::new(),
        }
    }

    /// Declares field types for type checking, as column name to type name
    /// pairs.
    ///
    /// Fails with a configuration error if a type name resolves to no known
    /// type or alias.
    pub fn with_field_types<I, N, T>(mut self, field_types: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        for (field, type_name) in field_types {
            let field = field.into();
            let type_name = type_name.as_ref();
            let dtype = DataType::parse(type_name).ok_or_else(|| ConfigError::UnknownTypeName {
                field: field.clone(),
                type_name: type_name.to_string(),
            })?;
            self.field_types.insert(field, dtype);
        }
        Ok(self)
    }

    /// Builds a validator from a parsed schema: one type check per field
    /// plus every declared constraint, instantiated with its field's column
    /// name.
    pub fn from_schema(schema: &Schema) -> Result<Self, ConfigError> {
        let mut field_types = IndexMap::with_capacity(schema.fields.len());
        let mut constraints = Vec::new();

        for (name, def) in &schema.fields {
            let dtype =
                DataType::parse(&def.field_type).ok_or_else(|| ConfigError::UnknownTypeName {
                    field: name.clone(),
                    type_name: def.field_type.clone(),
                })?;
            field_types.insert(name.clone(), dtype);

            for spec in &def.constraints {
                constraints.push(Constraint::from_spec(name, spec)?);
            }
        }

        Ok(Self {
            constraints,
            field_types,
        })
    }

    /// The constraints this validator runs, in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The declared field types, in schema order.
    pub fn field_types(&self) -> impl Iterator<Item = (&str, DataType)> {
        self.field_types.iter().map(|(name, t)| (name.as_str(), *t))
    }

    /// Runs one validation pass and returns the result unconditionally.
    ///
    /// This is the non-raising twin of [`validate`](Self::validate); both
    /// compute identical outcomes.
    pub fn check(&self, dataset: &Dataset) -> ValidationResult {
        debug!(
            fields = self.field_types.len(),
            constraints = self.constraints.len(),
            rows = dataset.height(),
            "running validation pass"
        );

        let type_outcomes = self
            .field_types
            .iter()
            .map(|(field, dtype)| check_field_type(field, *dtype, dataset))
            .collect();

        let constraint_outcomes = self
            .constraints
            .iter()
            .map(|constraint| constraint.evaluate(dataset))
            .collect();

        let result = ValidationResult::new(type_outcomes, constraint_outcomes);
        debug!(
            passed = result.passed(),
            failed = result.failed_checks(),
            "validation pass finished"
        );
        result
    }

    /// Runs one validation pass, raising [`ValidationError`] if any outcome
    /// failed.
    ///
    /// The error carries only the failing outcomes, type failures before
    /// constraint failures, with a composed message enumerating each.
    pub fn validate(&self, dataset: &Dataset) -> Result<ValidationResult, ValidationError> {
        let result = self.check(dataset);
        if result.passed() {
            Ok(result)
        } else {
            Err(ValidationError::from_result(result))
        }
    }
}
