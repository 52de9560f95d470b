//! Schema description types.
//!
//! This module contains the declarative side of datapact: a [`Schema`] maps
//! field names to a declared type and a list of constraint specifications.
//! A schema is built once (by the parser or the [`SchemaBuilder`]) and then
//! treated as read-only configuration by the validation engine.
//!
//! [`SchemaBuilder`]: crate::builder::SchemaBuilder

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A full validation schema: field name to field definition, in declaration
/// order.
///
/// Insertion order is preserved so that validation outcomes are reported
/// deterministically in the order fields were declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// Field definitions keyed by field (column) name
    pub fields: IndexMap<String, FieldDef>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Total number of constraint specifications across all fields.
    pub fn constraint_count(&self) -> usize {
        self.fields.values().map(|f| f.constraints.len()).sum()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

/// A single field definition in a schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Declared data type name (e.g., "Int64", "String", "Utf8")
    #[serde(rename = "type")]
    pub field_type: String,

    /// Constraint specifications for this field (may be empty)
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
}

/// Specification of a single constraint, as written in a schema description.
///
/// Each variant corresponds to one constraint kind; the `type` tag in the
/// JSON representation selects the variant. Parameter-presence rules
/// ("at least one of ...") are not expressible in the serialized shape and
/// are enforced when the specification is turned into a runnable constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintSpec {
    /// Bound the number or ratio of null values in a column
    Nullability {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_null_ratio: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_null_count: Option<u64>,
    },

    /// Require a minimum number or ratio of distinct values
    Uniqueness {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_unique_ratio: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_unique_count: Option<u64>,
    },

    /// Column minimum must not fall below a limit
    MinimumValue { min_value: f64 },

    /// Column maximum must not exceed a limit
    MaximumValue { max_value: f64 },

    /// Arithmetic mean must lie within the supplied bound(s)
    Mean {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower_bound: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper_bound: Option<f64>,
    },

    /// Median must lie within the supplied bound(s)
    Median {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower_bound: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper_bound: Option<f64>,
    },

    /// Quantile at `percentile` (0.0 to 1.0) must lie within the bound(s)
    Percentile {
        percentile: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower_bound: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper_bound: Option<f64>,
    },

    /// Sample standard deviation must lie within the supplied bound(s)
    StandardDeviation {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower_bound: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper_bound: Option<f64>,
    },

    /// Every non-null value's character length must lie within the bound(s)
    StringLength {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u64>,
    },

    /// Every non-null value must contain a match for the pattern
    RegexPattern { pattern: String },

    /// Every non-null value must be one of the allowed scalars
    ValueSet { allowed_values: Vec<serde_json::Value> },

    /// Dataset row count must lie within the supplied bound(s)
    RowCount {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_rows: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_rows: Option<u64>,
    },
}

impl ConstraintSpec {
    /// All recognized constraint kind tags, as they appear in schema files.
    pub const KINDS: [&'static str; 12] = [
        "nullability",
        "uniqueness",
        "minimum_value",
        "maximum_value",
        "mean",
        "median",
        "percentile",
        "standard_deviation",
        "string_length",
        "regex_pattern",
        "value_set",
        "row_count",
    ];

    /// The kind tag of this specification.
    pub fn kind(&self) -> &'static str {
        match self {
            ConstraintSpec::Nullability { .. } => "nullability",
            ConstraintSpec::Uniqueness { .. } => "uniqueness",
            ConstraintSpec::MinimumValue { .. } => "minimum_value",
            ConstraintSpec::MaximumValue { .. } => "maximum_value",
            ConstraintSpec::Mean { .. } => "mean",
            ConstraintSpec::Median { .. } => "median",
            ConstraintSpec::Percentile { .. } => "percentile",
            ConstraintSpec::StandardDeviation { .. } => "standard_deviation",
            ConstraintSpec::StringLength { .. } => "string_length",
            ConstraintSpec::RegexPattern { .. } => "regex_pattern",
            ConstraintSpec::ValueSet { .. } => "value_set",
            ConstraintSpec::RowCount { .. } => "row_count",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constraint_spec_tag_round_trip() {
        let spec = ConstraintSpec::MaximumValue { max_value: 120.0 };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "maximum_value");
        assert_eq!(json["max_value"], 120.0);

        let back: ConstraintSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), "maximum_value");
    }

    #[test]
    fn test_optional_parameters_default_to_none() {
        let spec: ConstraintSpec =
            serde_json::from_value(serde_json::json!({"type": "nullability", "max_null_ratio": 0.1}))
                .unwrap();
        match spec {
            ConstraintSpec::Nullability {
                max_null_ratio,
                max_null_count,
            } => {
                assert_eq!(max_null_ratio, Some(0.1));
                assert_eq!(max_null_count, None);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_kind_tags_match_known_kinds() {
        let specs = vec![
            ConstraintSpec::Nullability {
                max_null_ratio: Some(0.1),
                max_null_count: None,
            },
            ConstraintSpec::Uniqueness {
                min_unique_ratio: None,
                min_unique_count: Some(1),
            },
            ConstraintSpec::MinimumValue { min_value: 0.0 },
            ConstraintSpec::MaximumValue { max_value: 1.0 },
            ConstraintSpec::Mean {
                lower_bound: Some(0.0),
                upper_bound: None,
            },
            ConstraintSpec::Median {
                lower_bound: None,
                upper_bound: Some(1.0),
            },
            ConstraintSpec::Percentile {
                percentile: 0.95,
                lower_bound: None,
                upper_bound: Some(1.0),
            },
            ConstraintSpec::StandardDeviation {
                lower_bound: None,
                upper_bound: Some(2.0),
            },
            ConstraintSpec::StringLength {
                min_length: Some(1),
                max_length: None,
            },
            ConstraintSpec::RegexPattern {
                pattern: "@".to_string(),
            },
            ConstraintSpec::ValueSet {
                allowed_values: vec![serde_json::json!("a")],
            },
            ConstraintSpec::RowCount {
                min_rows: Some(1),
                max_rows: None,
            },
        ];

        for spec in specs {
            assert!(
                ConstraintSpec::KINDS.contains(&spec.kind()),
                "kind {} missing from KINDS",
                spec.kind()
            );
        }
    }

    #[test]
    fn test_schema_preserves_field_order() {
        let json = r#"{
            "fields": {
                "zulu": {"type": "String"},
                "alpha": {"type": "Int64"},
                "mike": {"type": "Float64"}
            }
        }"#;
        let schema: Schema = serde_json::from_str(json).unwrap();
        let names: Vec<&String> = schema.fields.keys().collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }
}
