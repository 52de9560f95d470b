//! Field type matching.
//!
//! Decides whether a dataset column's actual type satisfies a field's
//! declared type name. Comparison is exact within an alias class and
//! case-sensitive on type names; there is no numeric widening (an Int32
//! column does not satisfy a declared Int64).

use crate::dataset::Dataset;
use datapact_core::{CheckOutcome, Details};
use serde_json::json;
use std::fmt;

/// Resolved column data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Boolean,
}

impl DataType {
    /// Resolves a declared type name, including aliases.
    ///
    /// Alias classes: `String`/`Utf8`, `Boolean`/`Bool`; the numeric names
    /// are exact. Returns `None` for anything unrecognized.
    pub fn parse(name: &str) -> Option<DataType> {
        match name {
            "Int32" => Some(DataType::Int32),
            "Int64" => Some(DataType::Int64),
            "Float32" => Some(DataType::Float32),
            "Float64" => Some(DataType::Float64),
            "String" | "Utf8" => Some(DataType::String),
            "Boolean" | "Bool" => Some(DataType::Boolean),
            _ => None,
        }
    }

    /// Canonical name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
            DataType::String => "String",
            DataType::Boolean => "Boolean",
        }
    }

    /// True for the integer and float types.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int32 | DataType::Int64 | DataType::Float32 | DataType::Float64
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs the type check for one declared field against a dataset.
///
/// Produces one outcome per call, independent of any constraint outcomes:
/// a missing column and a type mismatch are distinct failures; a match is a
/// passing outcome carrying the expected/actual pair in its details.
pub fn check_field_type(field: &str, expected: DataType, dataset: &Dataset) -> CheckOutcome {
    let check = format!("field_type({field})");

    let Some(column) = dataset.column(field) else {
        return CheckOutcome::fail(
            check,
            format!("Column '{field}' not found in dataset"),
            Details::new(),
        );
    };

    let actual = column.dtype();
    let mut details = Details::new();
    details.insert("expected".to_string(), json!(expected.name()));
    details.insert("actual".to_string(), json!(actual.name()));

    if actual == expected {
        CheckOutcome::pass(check, "Field type check passed", details)
    } else {
        CheckOutcome::fail(
            check,
            format!("Type mismatch for field '{field}': expected {expected}, found {actual}"),
            details,
        )
    }
}
