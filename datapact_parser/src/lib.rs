//! Parser for datapact schema descriptions (JSON format).
//!
//! A schema file is a JSON object with a single supported top-level shape:
//!
//! ```json
//! {
//!   "fields": {
//!     "age": {
//!       "type": "Int64",
//!       "constraints": [
//!         {"type": "minimum_value", "min_value": 0},
//!         {"type": "maximum_value", "max_value": 120}
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Parsing validates the shape (the `fields` key is mandatory, each field
//! must declare a `type`, constraint entries must carry a known kind tag)
//! and produces a strongly-typed [`Schema`]. Parameter-presence rules per
//! constraint kind are enforced later, when the schema is turned into a
//! validator.
//!
//! # Example
//!
//! ```rust
//! use datapact_parser::parse_str;
//!
//! let schema = parse_str(r#"{
//!     "fields": {
//!         "user_id": {"type": "Int64"},
//!         "email": {
//!             "type": "String",
//!             "constraints": [{"type": "regex_pattern", "pattern": "@"}]
//!         }
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(schema.fields.len(), 2);
//! assert_eq!(schema.constraint_count(), 1);
//! ```

use datapact_core::{ConstraintSpec, FieldDef, Schema};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while parsing a schema description.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The mandatory top-level `fields` key is absent
    #[error("Schema must contain a 'fields' key")]
    MissingFieldsKey,

    /// The description violates the supported shape
    #[error("{0}")]
    InvalidSchema(String),

    /// A constraint entry carries an unrecognized kind tag
    #[error("Unknown constraint type: {0}")]
    UnknownConstraintKind(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Parses a schema description from a JSON string.
pub fn parse_str(content: &str) -> Result<Schema> {
    let value: Value = serde_json::from_str(content)?;
    parse_value(&value)
}

/// Parses a schema description from a file.
pub fn parse_file(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a schema description from an already-deserialized JSON value.
pub fn parse_value(value: &Value) -> Result<Schema> {
    let Some(root) = value.as_object() else {
        return Err(ParserError::InvalidSchema(
            "Schema must be a JSON object".to_string(),
        ));
    };

    let Some(fields_value) = root.get("fields") else {
        return Err(ParserError::MissingFieldsKey);
    };

    let Some(fields) = fields_value.as_object() else {
        return Err(ParserError::InvalidSchema(
            "'fields' must be an object".to_string(),
        ));
    };

    let mut parsed = IndexMap::with_capacity(fields.len());
    for (name, spec) in fields {
        parsed.insert(name.clone(), parse_field(name, spec)?);
    }

    Ok(Schema { fields: parsed })
}

/// Parses a single field specification.
fn parse_field(name: &str, spec: &Value) -> Result<FieldDef> {
    let Some(spec) = spec.as_object() else {
        return Err(ParserError::InvalidSchema(format!(
            "Field '{name}' specification must be an object"
        )));
    };

    let field_type = match spec.get("type") {
        Some(Value::String(t)) => t.clone(),
        Some(_) => {
            return Err(ParserError::InvalidSchema(format!(
                "Field '{name}' type must be a string"
            )));
        }
        None => {
            return Err(ParserError::InvalidSchema(format!(
                "Field '{name}' must specify a 'type'"
            )));
        }
    };

    let constraints = match spec.get("constraints") {
        None => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| parse_constraint(name, entry))
            .collect::<Result<Vec<_>>>()?,
        Some(_) => {
            return Err(ParserError::InvalidSchema(format!(
                "Field '{name}' constraints must be a list"
            )));
        }
    };

    Ok(FieldDef {
        field_type,
        constraints,
    })
}

/// Parses a single constraint entry.
fn parse_constraint(field: &str, entry: &Value) -> Result<ConstraintSpec> {
    let Some(obj) = entry.as_object() else {
        return Err(ParserError::InvalidSchema(format!(
            "Constraint for field '{field}' must be an object"
        )));
    };

    let Some(Value::String(kind)) = obj.get("type") else {
        return Err(ParserError::InvalidSchema(
            "Constraint definition must contain a 'type' key".to_string(),
        ));
    };

    if !ConstraintSpec::KINDS.contains(&kind.as_str()) {
        return Err(ParserError::UnknownConstraintKind(kind.clone()));
    }

    Ok(serde_json::from_value(entry.clone())?)
}
