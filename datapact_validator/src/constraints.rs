//! Constraint construction and evaluation.
//!
//! The twelve constraint kinds form a closed set of tagged variants
//! dispatched through a single `evaluate` capability. Each variant
//! encapsulates its parameters; parameter-presence rules ("at least one
//! of ...") are enforced at construction, so an existing `Constraint` is
//! always runnable. Evaluation delegates every aggregate to the dataset
//! column and produces one [`CheckOutcome`] per call.
//!
//! All kinds share these semantics:
//!
//! - a referenced column absent from the dataset is a distinct failure,
//!   produced before any aggregate is computed;
//! - a column consisting entirely of null values trivially passes the
//!   value-based kinds and reports a null aggregate;
//! - with two-sided bounds, both must hold; one-sided bounds check only the
//!   supplied side.

use crate::dataset::{Column, DataValue, Dataset};
use datapact_core::{CheckOutcome, ConfigError, ConstraintSpec, Details};
use regex::Regex;
use serde_json::json;

/// Optional lower/upper limits on a computed aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Bounds {
    /// Messages for every violated side, in lower-then-upper order.
    fn violations(&self, label: &str, value: f64) -> Vec<String> {
        let mut violations = Vec::new();
        if let Some(lower) = self.lower {
            if value < lower {
                violations.push(format!("{label} {value} is below lower bound {lower}"));
            }
        }
        if let Some(upper) = self.upper {
            if value > upper {
                violations.push(format!("{label} {value} exceeds upper bound {upper}"));
            }
        }
        violations
    }
}

/// A single runnable check over a named column, or over the whole dataset
/// (`RowCount`).
#[derive(Debug, Clone)]
pub enum Constraint {
    Nullability {
        column: String,
        max_null_ratio: Option<f64>,
        max_null_count: Option<u64>,
    },
    Uniqueness {
        column: String,
        min_unique_ratio: Option<f64>,
        min_unique_count: Option<u64>,
    },
    MinimumValue {
        column: String,
        min_value: f64,
    },
    MaximumValue {
        column: String,
        max_value: f64,
    },
    Mean {
        column: String,
        bounds: Bounds,
    },
    Median {
        column: String,
        bounds: Bounds,
    },
    Percentile {
        column: String,
        percentile: f64,
        bounds: Bounds,
    },
    StandardDeviation {
        column: String,
        bounds: Bounds,
    },
    StringLength {
        column: String,
        min_length: Option<u64>,
        max_length: Option<u64>,
    },
    RegexPattern {
        column: String,
        pattern: Regex,
    },
    ValueSet {
        column: String,
        allowed_values: Vec<DataValue>,
    },
    RowCount {
        min_rows: Option<u64>,
        max_rows: Option<u64>,
    },
}

impl Constraint {
    /// Null-ratio and/or null-count bound on a column.
    pub fn nullability(
        column: impl Into<String>,
        max_null_ratio: Option<f64>,
        max_null_count: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if max_null_ratio.is_none() && max_null_count.is_none() {
            return Err(ConfigError::missing_parameter(
                "nullability",
                "at least one of 'max_null_ratio' or 'max_null_count'",
            ));
        }
        Ok(Constraint::Nullability {
            column: column.into(),
            max_null_ratio,
            max_null_count,
        })
    }

    /// Distinct-ratio and/or distinct-count requirement on a column.
    pub fn uniqueness(
        column: impl Into<String>,
        min_unique_ratio: Option<f64>,
        min_unique_count: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if min_unique_ratio.is_none() && min_unique_count.is_none() {
            return Err(ConfigError::missing_parameter(
                "uniqueness",
                "at least one of 'min_unique_ratio' or 'min_unique_count'",
            ));
        }
        Ok(Constraint::Uniqueness {
            column: column.into(),
            min_unique_ratio,
            min_unique_count,
        })
    }

    /// Column minimum must be at least `min_value`.
    pub fn minimum_value(column: impl Into<String>, min_value: f64) -> Self {
        Constraint::MinimumValue {
            column: column.into(),
            min_value,
        }
    }

    /// Column maximum must be at most `max_value`.
    pub fn maximum_value(column: impl Into<String>, max_value: f64) -> Self {
        Constraint::MaximumValue {
            column: column.into(),
            max_value,
        }
    }

    /// Mean within the supplied bound(s).
    pub fn mean(
        column: impl Into<String>,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<Self, ConfigError> {
        Ok(Constraint::Mean {
            column: column.into(),
            bounds: bounds_for("mean", lower_bound, upper_bound)?,
        })
    }

    /// Median within the supplied bound(s).
    pub fn median(
        column: impl Into<String>,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<Self, ConfigError> {
        Ok(Constraint::Median {
            column: column.into(),
            bounds: bounds_for("median", lower_bound, upper_bound)?,
        })
    }

    /// Quantile at `percentile` (0.0 to 1.0) within the supplied bound(s).
    pub fn percentile(
        column: impl Into<String>,
        percentile: f64,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&percentile) {
            return Err(ConfigError::PercentileOutOfRange(percentile));
        }
        Ok(Constraint::Percentile {
            column: column.into(),
            percentile,
            bounds: bounds_for("percentile", lower_bound, upper_bound)?,
        })
    }

    /// Sample standard deviation within the supplied bound(s).
    pub fn standard_deviation(
        column: impl Into<String>,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<Self, ConfigError> {
        Ok(Constraint::StandardDeviation {
            column: column.into(),
            bounds: bounds_for("standard_deviation", lower_bound, upper_bound)?,
        })
    }

    /// Character-length bound(s) on every non-null value.
    pub fn string_length(
        column: impl Into<String>,
        min_length: Option<u64>,
        max_length: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if min_length.is_none() && max_length.is_none() {
            return Err(ConfigError::missing_parameter(
                "string_length",
                "at least one of 'min_length' or 'max_length'",
            ));
        }
        Ok(Constraint::StringLength {
            column: column.into(),
            min_length,
            max_length,
        })
    }

    /// Every non-null value must contain a match for `pattern`.
    ///
    /// Matching is substring ("contains") semantics; supply `^...$` anchors
    /// for exact matches. The pattern is compiled here, so an invalid
    /// pattern is a configuration error.
    pub fn regex_pattern(
        column: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, ConfigError> {
        let compiled =
            Regex::new(pattern).map_err(|e| ConfigError::invalid_regex(pattern, e.to_string()))?;
        Ok(Constraint::RegexPattern {
            column: column.into(),
            pattern: compiled,
        })
    }

    /// Every non-null value must be one of `allowed_values` (non-empty).
    pub fn value_set(
        column: impl Into<String>,
        allowed_values: Vec<DataValue>,
    ) -> Result<Self, ConfigError> {
        if allowed_values.is_empty() {
            return Err(ConfigError::EmptyAllowedValues);
        }
        Ok(Constraint::ValueSet {
            column: column.into(),
            allowed_values,
        })
    }

    /// Dataset row count within the supplied bound(s). This is the only
    /// dataset-level kind; it references no column.
    pub fn row_count(min_rows: Option<u64>, max_rows: Option<u64>) -> Result<Self, ConfigError> {
        if min_rows.is_none() && max_rows.is_none() {
            return Err(ConfigError::missing_parameter(
                "row_count",
                "at least one of 'min_rows' or 'max_rows'",
            ));
        }
        Ok(Constraint::RowCount { min_rows, max_rows })
    }

    /// Instantiates the constraint for a specification attached to `column`.
    ///
    /// `row_count` specifications ignore the column reference.
    pub fn from_spec(column: &str, spec: &ConstraintSpec) -> Result<Self, ConfigError> {
        match spec {
            ConstraintSpec::Nullability {
                max_null_ratio,
                max_null_count,
            } => Self::nullability(column, *max_null_ratio, *max_null_count),
            ConstraintSpec::Uniqueness {
                min_unique_ratio,
                min_unique_count,
            } => Self::uniqueness(column, *min_unique_ratio, *min_unique_count),
            ConstraintSpec::MinimumValue { min_value } => {
                Ok(Self::minimum_value(column, *min_value))
            }
            ConstraintSpec::MaximumValue { max_value } => {
                Ok(Self::maximum_value(column, *max_value))
            }
            ConstraintSpec::Mean {
                lower_bound,
                upper_bound,
            } => Self::mean(column, *lower_bound, *upper_bound),
            ConstraintSpec::Median {
                lower_bound,
                upper_bound,
            } => Self::median(column, *lower_bound, *upper_bound),
            ConstraintSpec::Percentile {
                percentile,
                lower_bound,
                upper_bound,
            } => Self::percentile(column, *percentile, *lower_bound, *upper_bound),
            ConstraintSpec::StandardDeviation {
                lower_bound,
                upper_bound,
            } => Self::standard_deviation(column, *lower_bound, *upper_bound),
            ConstraintSpec::StringLength {
                min_length,
                max_length,
            } => Self::string_length(column, *min_length, *max_length),
            ConstraintSpec::RegexPattern { pattern } => Self::regex_pattern(column, pattern),
            ConstraintSpec::ValueSet { allowed_values } => {
                let mut allowed = Vec::with_capacity(allowed_values.len());
                for value in allowed_values {
                    let scalar = DataValue::from_json(value).ok_or_else(|| {
                        ConfigError::NonScalarAllowedValue {
                            column: column.to_string(),
                            found: json_type_name(value).to_string(),
                        }
                    })?;
                    allowed.push(scalar);
                }
                Self::value_set(column, allowed)
            }
            ConstraintSpec::RowCount { min_rows, max_rows } => {
                Self::row_count(*min_rows, *max_rows)
            }
        }
    }

    /// The kind tag of this constraint.
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::Nullability { .. } => "nullability",
            Constraint::Uniqueness { .. } => "uniqueness",
            Constraint::MinimumValue { .. } => "minimum_value",
            Constraint::MaximumValue { .. } => "maximum_value",
            Constraint::Mean { .. } => "mean",
            Constraint::Median { .. } => "median",
            Constraint::Percentile { .. } => "percentile",
            Constraint::StandardDeviation { .. } => "standard_deviation",
            Constraint::StringLength { .. } => "string_length",
            Constraint::RegexPattern { .. } => "regex_pattern",
            Constraint::ValueSet { .. } => "value_set",
            Constraint::RowCount { .. } => "row_count",
        }
    }

    /// The target column, if this is a column-level kind.
    pub fn column(&self) -> Option<&str> {
        match self {
            Constraint::Nullability { column, .. }
            | Constraint::Uniqueness { column, .. }
            | Constraint::MinimumValue { column, .. }
            | Constraint::MaximumValue { column, .. }
            | Constraint::Mean { column, .. }
            | Constraint::Median { column, .. }
            | Constraint::Percentile { column, .. }
            | Constraint::StandardDeviation { column, .. }
            | Constraint::StringLength { column, .. }
            | Constraint::RegexPattern { column, .. }
            | Constraint::ValueSet { column, .. } => Some(column),
            Constraint::RowCount { .. } => None,
        }
    }

    /// Identity used in outcomes, e.g. `maximum_value(age)`.
    pub fn identity(&self) -> String {
        match self.column() {
            Some(column) => format!("{}({column})", self.kind()),
            None => self.kind().to_string(),
        }
    }

    /// Evaluates this constraint against a dataset.
    pub fn evaluate(&self, dataset: &Dataset) -> CheckOutcome {
        let check = self.identity();

        match self {
            Constraint::Nullability {
                column,
                max_null_ratio,
                max_null_count,
            } => match dataset.column(column) {
                Some(col) => eval_nullability(check, col, *max_null_ratio, *max_null_count),
                None => missing_column(check, column),
            },
            Constraint::Uniqueness {
                column,
                min_unique_ratio,
                min_unique_count,
            } => match dataset.column(column) {
                Some(col) => eval_uniqueness(check, col, *min_unique_ratio, *min_unique_count),
                None => missing_column(check, column),
            },
            Constraint::MinimumValue { column, min_value } => match dataset.column(column) {
                Some(col) => eval_minimum(check, col, *min_value),
                None => missing_column(check, column),
            },
            Constraint::MaximumValue { column, max_value } => match dataset.column(column) {
                Some(col) => eval_maximum(check, col, *max_value),
                None => missing_column(check, column),
            },
            Constraint::Mean { column, bounds } => match dataset.column(column) {
                Some(col) => eval_mean(check, col, *bounds),
                None => missing_column(check, column),
            },
            Constraint::Median { column, bounds } => match dataset.column(column) {
                Some(col) => eval_median(check, col, *bounds),
                None => missing_column(check, column),
            },
            Constraint::Percentile {
                column,
                percentile,
                bounds,
            } => match dataset.column(column) {
                Some(col) => eval_percentile(check, col, *percentile, *bounds),
                None => missing_column(check, column),
            },
            Constraint::StandardDeviation { column, bounds } => match dataset.column(column) {
                Some(col) => eval_standard_deviation(check, col, *bounds),
                None => missing_column(check, column),
            },
            Constraint::StringLength {
                column,
                min_length,
                max_length,
            } => match dataset.column(column) {
                Some(col) => eval_string_length(check, col, *min_length, *max_length),
                None => missing_column(check, column),
            },
            Constraint::RegexPattern { column, pattern } => match dataset.column(column) {
                Some(col) => eval_regex_pattern(check, col, pattern),
                None => missing_column(check, column),
            },
            Constraint::ValueSet {
                column,
                allowed_values,
            } => match dataset.column(column) {
                Some(col) => eval_value_set(check, col, allowed_values),
                None => missing_column(check, column),
            },
            Constraint::RowCount { min_rows, max_rows } => {
                eval_row_count(check, dataset.height(), *min_rows, *max_rows)
            }
        }
    }
}

/// Validates that at least one bound was supplied for a bounded kind.
fn bounds_for(
    kind: &str,
    lower: Option<f64>,
    upper: Option<f64>,
) -> Result<Bounds, ConfigError> {
    if lower.is_none() && upper.is_none() {
        return Err(ConfigError::missing_parameter(
            kind,
            "at least one of 'lower_bound' or 'upper_bound'",
        ));
    }
    Ok(Bounds { lower, upper })
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn missing_column(check: String, column: &str) -> CheckOutcome {
    CheckOutcome::fail(
        check,
        format!("Column '{column}' not found in dataset"),
        Details::new(),
    )
}

/// Pass with the shared message when the whole column is null.
fn all_null_outcome(check: String, aggregate_key: &str) -> CheckOutcome {
    let mut details = Details::new();
    details.insert(aggregate_key.to_string(), serde_json::Value::Null);
    CheckOutcome::pass(check, "Column contains only null values", details)
}

/// Fail when an aggregate kind meets a column it cannot apply to.
fn wrong_column_type(check: String, kind: &str, required: &str, col: &Column) -> CheckOutcome {
    CheckOutcome::fail(
        check,
        format!(
            "{kind} constraint requires a {required} column, found {}",
            col.dtype()
        ),
        Details::new(),
    )
}

/// Pass or fail from a list of violation messages.
fn finish(
    check: String,
    violations: Vec<String>,
    pass_message: &str,
    details: Details,
) -> CheckOutcome {
    if violations.is_empty() {
        CheckOutcome::pass(check, pass_message, details)
    } else {
        CheckOutcome::fail(check, violations.join("; "), details)
    }
}

fn eval_nullability(
    check: String,
    col: &Column,
    max_null_ratio: Option<f64>,
    max_null_count: Option<u64>,
) -> CheckOutcome {
    let null_count = col.null_count();
    let total_count = col.len();
    let null_ratio = if total_count > 0 {
        null_count as f64 / total_count as f64
    } else {
        0.0
    };

    let mut violations = Vec::new();
    if let Some(max) = max_null_count {
        if null_count as u64 > max {
            violations.push(format!("Null count {null_count} exceeds maximum {max}"));
        }
    }
    if let Some(max) = max_null_ratio {
        if null_ratio > max {
            violations.push(format!(
                "Null ratio {null_ratio:.4} exceeds maximum {max:.4}"
            ));
        }
    }

    let mut details = Details::new();
    details.insert("null_count".to_string(), json!(null_count));
    details.insert("total_count".to_string(), json!(total_count));
    details.insert("null_ratio".to_string(), json!(null_ratio));
    finish(check, violations, "Nullability check passed", details)
}

fn eval_uniqueness(
    check: String,
    col: &Column,
    min_unique_ratio: Option<f64>,
    min_unique_count: Option<u64>,
) -> CheckOutcome {
    let unique_count = col.n_unique();
    let total_count = col.len();
    let unique_ratio = if total_count > 0 {
        unique_count as f64 / total_count as f64
    } else {
        0.0
    };

    let mut violations = Vec::new();
    if let Some(min) = min_unique_count {
        if (unique_count as u64) < min {
            violations.push(format!("Unique count {unique_count} is below minimum {min}"));
        }
    }
    if let Some(min) = min_unique_ratio {
        if unique_ratio < min {
            violations.push(format!(
                "Unique ratio {unique_ratio:.4} is below minimum {min:.4}"
            ));
        }
    }

    let mut details = Details::new();
    details.insert("unique_count".to_string(), json!(unique_count));
    details.insert("total_count".to_string(), json!(total_count));
    details.insert("unique_ratio".to_string(), json!(unique_ratio));
    finish(check, violations, "Uniqueness check passed", details)
}

fn eval_minimum(check: String, col: &Column, min_value: f64) -> CheckOutcome {
    if !col.is_numeric() {
        return wrong_column_type(check, "minimum_value", "numeric", col);
    }
    let Some(actual) = col.min() else {
        return all_null_outcome(check, "actual_min");
    };

    let mut details = Details::new();
    details.insert("actual_min".to_string(), json!(actual));
    details.insert("min_value".to_string(), json!(min_value));

    if actual >= min_value {
        CheckOutcome::pass(check, "Minimum value check passed", details)
    } else {
        CheckOutcome::fail(
            check,
            format!("Minimum value {actual} is below limit {min_value}"),
            details,
        )
    }
}

fn eval_maximum(check: String, col: &Column, max_value: f64) -> CheckOutcome {
    if !col.is_numeric() {
        return wrong_column_type(check, "maximum_value", "numeric", col);
    }
    let Some(actual) = col.max() else {
        return all_null_outcome(check, "actual_max");
    };

    let mut details = Details::new();
    details.insert("actual_max".to_string(), json!(actual));
    details.insert("max_value".to_string(), json!(max_value));

    if actual <= max_value {
        CheckOutcome::pass(check, "Maximum value check passed", details)
    } else {
        CheckOutcome::fail(
            check,
            format!("Maximum value {actual} exceeds limit {max_value}"),
            details,
        )
    }
}

/// Shared body of the bounded-aggregate kinds (mean, median, percentile,
/// standard deviation).
fn bounded_outcome(
    check: String,
    label: &str,
    pass_message: &str,
    aggregate_key: &str,
    aggregate: Option<f64>,
    bounds: Bounds,
    extra_details: Details,
) -> CheckOutcome {
    let Some(value) = aggregate else {
        return all_null_outcome(check, aggregate_key);
    };

    let mut details = Details::new();
    details.insert(aggregate_key.to_string(), json!(value));
    for (key, detail) in extra_details {
        details.insert(key, detail);
    }
    details.insert("lower_bound".to_string(), json!(bounds.lower));
    details.insert("upper_bound".to_string(), json!(bounds.upper));

    finish(check, bounds.violations(label, value), pass_message, details)
}

fn eval_mean(check: String, col: &Column, bounds: Bounds) -> CheckOutcome {
    if !col.is_numeric() {
        return wrong_column_type(check, "mean", "numeric", col);
    }
    bounded_outcome(
        check,
        "Mean",
        "Mean check passed",
        "actual_mean",
        col.mean(),
        bounds,
        Details::new(),
    )
}

fn eval_median(check: String, col: &Column, bounds: Bounds) -> CheckOutcome {
    if !col.is_numeric() {
        return wrong_column_type(check, "median", "numeric", col);
    }
    bounded_outcome(
        check,
        "Median",
        "Median check passed",
        "actual_median",
        col.median(),
        bounds,
        Details::new(),
    )
}

fn eval_percentile(check: String, col: &Column, percentile: f64, bounds: Bounds) -> CheckOutcome {
    if !col.is_numeric() {
        return wrong_column_type(check, "percentile", "numeric", col);
    }
    let mut extra = Details::new();
    extra.insert("percentile".to_string(), json!(percentile));
    bounded_outcome(
        check,
        &format!("Percentile {percentile} value"),
        "Percentile check passed",
        "actual_percentile",
        col.quantile(percentile),
        bounds,
        extra,
    )
}

fn eval_standard_deviation(check: String, col: &Column, bounds: Bounds) -> CheckOutcome {
    if !col.is_numeric() {
        return wrong_column_type(check, "standard_deviation", "numeric", col);
    }
    bounded_outcome(
        check,
        "Standard deviation",
        "Standard deviation check passed",
        "actual_std",
        col.std(),
        bounds,
        Details::new(),
    )
}

fn eval_string_length(
    check: String,
    col: &Column,
    min_length: Option<u64>,
    max_length: Option<u64>,
) -> CheckOutcome {
    if !col.is_string() {
        return wrong_column_type(check, "string_length", "string", col);
    }

    let Some((min_found, max_found)) = col.str_length_range() else {
        let mut details = Details::new();
        details.insert("min_length_found".to_string(), serde_json::Value::Null);
        details.insert("max_length_found".to_string(), serde_json::Value::Null);
        return CheckOutcome::pass(check, "Column contains only null values", details);
    };

    let mut violations = Vec::new();
    if let Some(min) = min_length {
        if (min_found as u64) < min {
            violations.push(format!(
                "String length {min_found} is below required minimum {min}"
            ));
        }
    }
    if let Some(max) = max_length {
        if (max_found as u64) > max {
            violations.push(format!(
                "String length {max_found} exceeds allowed maximum {max}"
            ));
        }
    }

    let mut details = Details::new();
    details.insert("min_length_found".to_string(), json!(min_found));
    details.insert("max_length_found".to_string(), json!(max_found));
    details.insert("min_length".to_string(), json!(min_length));
    details.insert("max_length".to_string(), json!(max_length));
    finish(check, violations, "String length check passed", details)
}

fn eval_regex_pattern(check: String, col: &Column, pattern: &Regex) -> CheckOutcome {
    if !col.is_string() {
        return wrong_column_type(check, "regex_pattern", "string", col);
    }

    let mismatch_count = col.count_not_matching(pattern);

    let mut details = Details::new();
    details.insert("mismatch_count".to_string(), json!(mismatch_count));
    details.insert("pattern".to_string(), json!(pattern.as_str()));

    if mismatch_count == 0 {
        CheckOutcome::pass(check, "Regex pattern check passed", details)
    } else {
        CheckOutcome::fail(
            check,
            format!(
                "{mismatch_count} value(s) do not match pattern '{}'",
                pattern.as_str()
            ),
            details,
        )
    }
}

fn eval_value_set(check: String, col: &Column, allowed_values: &[DataValue]) -> CheckOutcome {
    let (invalid_count, invalid_values) = col.not_in(allowed_values);

    let mut details = Details::new();
    details.insert("invalid_count".to_string(), json!(invalid_count));
    details.insert(
        "invalid_values".to_string(),
        serde_json::Value::Array(invalid_values.iter().map(DataValue::to_json).collect()),
    );
    details.insert(
        "allowed_values".to_string(),
        serde_json::Value::Array(allowed_values.iter().map(DataValue::to_json).collect()),
    );

    if invalid_count == 0 {
        CheckOutcome::pass(check, "Value set check passed", details)
    } else {
        let listed: Vec<String> = invalid_values.iter().map(|v| v.to_string()).collect();
        CheckOutcome::fail(
            check,
            format!(
                "{invalid_count} value(s) not in allowed set: [{}]",
                listed.join(", ")
            ),
            details,
        )
    }
}

fn eval_row_count(
    check: String,
    height: usize,
    min_rows: Option<u64>,
    max_rows: Option<u64>,
) -> CheckOutcome {
    let mut violations = Vec::new();
    if let Some(min) = min_rows {
        if (height as u64) < min {
            violations.push(format!("Row count {height} is below minimum {min}"));
        }
    }
    if let Some(max) = max_rows {
        if (height as u64) > max {
            violations.push(format!("Row count {height} exceeds maximum {max}"));
        }
    }

    let mut details = Details::new();
    details.insert("row_count".to_string(), json!(height));
    details.insert("min_rows".to_string(), json!(min_rows));
    details.insert("max_rows".to_string(), json!(max_rows));
    finish(check, violations, "Row count check passed", details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset_with(name: &str, column: Column) -> Dataset {
        Dataset::from_columns([(name.to_string(), column)]).unwrap()
    }

    #[test]
    fn test_nullability_requires_a_parameter() {
        let err = Constraint::nullability("a", None, None).unwrap_err();
        assert!(err.to_string().contains("max_null_ratio"));
    }

    #[test]
    fn test_nullability_ratio_boundary_is_inclusive() {
        // 1 null out of 4 rows: ratio exactly 0.25 must pass.
        let dataset = dataset_with("a", Column::from(vec![Some(1i64), Some(2), Some(3), None]));
        let constraint = Constraint::nullability("a", Some(0.25), None).unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(outcome.passed, "boundary ratio should pass: {}", outcome.message);

        let stricter = Constraint::nullability("a", Some(0.2), None).unwrap();
        let outcome = stricter.evaluate(&dataset);
        assert!(!outcome.passed);
        assert!(outcome.message.contains("Null ratio"));
    }

    #[test]
    fn test_nullability_count_bound() {
        let dataset = dataset_with("a", Column::from(vec![None::<i64>, None, Some(3)]));
        let constraint = Constraint::nullability("a", None, Some(1)).unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(outcome.message, "Null count 2 exceeds maximum 1");
        assert_eq!(outcome.details["null_count"], 2);
        assert_eq!(outcome.details["total_count"], 3);
    }

    #[test]
    fn test_uniqueness_ratio_and_count() {
        let dataset = dataset_with("a", Column::from(vec![1i64, 1, 1, 2, 2]));
        let constraint = Constraint::uniqueness("a", Some(0.5), None).unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert!(outcome.message.contains("is below minimum"));
        assert_eq!(outcome.details["unique_count"], 2);

        let by_count = Constraint::uniqueness("a", None, Some(2)).unwrap();
        assert!(by_count.evaluate(&dataset).passed);
    }

    #[test]
    fn test_minimum_and_maximum_value() {
        let dataset = dataset_with("age", Column::from(vec![25i64, 150]));

        let max = Constraint::maximum_value("age", 120.0);
        let outcome = max.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(outcome.message, "Maximum value 150 exceeds limit 120");
        assert_eq!(outcome.check, "maximum_value(age)");

        let min = Constraint::minimum_value("age", 0.0);
        assert!(min.evaluate(&dataset).passed);
    }

    #[test]
    fn test_all_null_column_passes_value_checks() {
        let dataset = dataset_with("a", Column::from(vec![None::<f64>, None, None]));

        let checks = vec![
            Constraint::minimum_value("a", 0.0),
            Constraint::maximum_value("a", 1.0),
            Constraint::mean("a", Some(0.0), None).unwrap(),
            Constraint::median("a", None, Some(1.0)).unwrap(),
            Constraint::percentile("a", 0.9, None, Some(1.0)).unwrap(),
            Constraint::standard_deviation("a", None, Some(1.0)).unwrap(),
        ];

        for constraint in checks {
            let outcome = constraint.evaluate(&dataset);
            assert!(outcome.passed, "{} should pass on all-null", outcome.check);
            assert_eq!(outcome.message, "Column contains only null values");
        }
    }

    #[test]
    fn test_mean_one_sided_bound_does_not_require_the_other() {
        let dataset = dataset_with("a", Column::from(vec![1.0f64, 2.0, 3.0]));
        let lower_only = Constraint::mean("a", Some(1.5), None).unwrap();
        assert!(lower_only.evaluate(&dataset).passed);

        let upper_only = Constraint::mean("a", None, Some(1.5)).unwrap();
        let outcome = upper_only.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(outcome.message, "Mean 2 exceeds upper bound 1.5");
    }

    #[test]
    fn test_median_two_sided_bounds() {
        let dataset = dataset_with("a", Column::from(vec![1i64, 2, 3, 4, 5]));
        let constraint = Constraint::median("a", Some(2.0), Some(4.0)).unwrap();
        assert!(constraint.evaluate(&dataset).passed);

        let outside = Constraint::median("a", Some(4.0), Some(5.0)).unwrap();
        let outcome = outside.evaluate(&dataset);
        assert!(outcome.message.contains("is below lower bound"));
    }

    #[test]
    fn test_percentile_range_is_validated() {
        let err = Constraint::percentile("a", 1.5, Some(0.0), None).unwrap_err();
        assert!(matches!(err, ConfigError::PercentileOutOfRange(_)));
    }

    #[test]
    fn test_percentile_violation_message_names_the_percentile() {
        let dataset = dataset_with("a", Column::from(vec![10.0f64, 20.0, 30.0, 40.0, 50.0]));
        let constraint = Constraint::percentile("a", 0.5, None, Some(25.0)).unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.message,
            "Percentile 0.5 value 30 exceeds upper bound 25"
        );
        assert_eq!(outcome.details["percentile"], 0.5);
    }

    #[test]
    fn test_standard_deviation_bounds() {
        let dataset = dataset_with("a", Column::from(vec![10i64, 10, 10, 10]));
        let constraint = Constraint::standard_deviation("a", Some(1.0), None).unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert!(outcome.message.contains("is below lower bound"));
    }

    #[test]
    fn test_string_length_bounds() {
        let dataset = dataset_with("s", Column::from(vec![Some("a"), Some("abc"), None]));
        let constraint = Constraint::string_length("s", Some(2), None).unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.message,
            "String length 1 is below required minimum 2"
        );
        assert_eq!(outcome.details["min_length_found"], 1);
        assert_eq!(outcome.details["max_length_found"], 3);
    }

    #[test]
    fn test_regex_pattern_nulls_treated_as_matching() {
        let dataset = dataset_with(
            "email",
            Column::from(vec![Some("a@b.com"), None, Some("c@d.org")]),
        );
        let constraint = Constraint::regex_pattern("email", "@").unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(outcome.passed);
        assert_eq!(outcome.details["mismatch_count"], 0);
    }

    #[test]
    fn test_regex_pattern_is_substring_match() {
        let dataset = dataset_with("code", Column::from(vec!["ABC123", "xyz"]));
        let constraint = Constraint::regex_pattern("code", r"\d").unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(outcome.message, r"1 value(s) do not match pattern '\d'");
    }

    #[test]
    fn test_invalid_regex_is_configuration_error() {
        let err = Constraint::regex_pattern("a", "[invalid(regex").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegex { .. }));
    }

    #[test]
    fn test_value_set_reports_invalid_values() {
        let dataset = dataset_with(
            "status",
            Column::from(vec![Some("active"), Some("cancelled"), None]),
        );
        let constraint = Constraint::value_set(
            "status",
            vec![DataValue::from("active"), DataValue::from("inactive")],
        )
        .unwrap();

        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(outcome.details["invalid_count"], 1);
        assert_eq!(outcome.details["invalid_values"], json!(["cancelled"]));
        assert_eq!(
            outcome.message,
            "1 value(s) not in allowed set: [cancelled]"
        );
    }

    #[test]
    fn test_value_set_empty_list_is_configuration_error() {
        let err = Constraint::value_set("status", Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAllowedValues));
    }

    #[test]
    fn test_value_set_numeric() {
        let dataset = dataset_with("priority", Column::from(vec![1i64, 2, 3]));
        let constraint = Constraint::value_set(
            "priority",
            vec![DataValue::Int(1), DataValue::Int(2), DataValue::Int(3)],
        )
        .unwrap();
        assert!(constraint.evaluate(&dataset).passed);
    }

    #[test]
    fn test_row_count_bounds() {
        let dataset = dataset_with("a", Column::from(vec![1i64, 2, 3, 4, 5]));

        let constraint = Constraint::row_count(Some(10), None).unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(outcome.message, "Row count 5 is below minimum 10");
        assert_eq!(outcome.check, "row_count");

        let exact = Constraint::row_count(Some(5), Some(5)).unwrap();
        assert!(exact.evaluate(&dataset).passed);
    }

    #[test]
    fn test_row_count_on_empty_dataset() {
        let constraint = Constraint::row_count(Some(0), Some(10)).unwrap();
        let outcome = constraint.evaluate(&Dataset::new());
        assert!(outcome.passed);
        assert_eq!(outcome.details["row_count"], 0);
    }

    #[test]
    fn test_missing_column_is_reported_before_aggregates() {
        let dataset = dataset_with("present", Column::from(vec![1i64]));
        let constraint = Constraint::mean("absent", Some(0.0), None).unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(outcome.message, "Column 'absent' not found in dataset");
        assert!(outcome.details.is_empty());
    }

    #[test]
    fn test_numeric_kind_on_string_column_fails() {
        let dataset = dataset_with("s", Column::from(vec!["a", "b"]));
        let constraint = Constraint::mean("s", Some(0.0), None).unwrap();
        let outcome = constraint.evaluate(&dataset);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.message,
            "mean constraint requires a numeric column, found String"
        );
    }

    #[test]
    fn test_from_spec_builds_each_kind() {
        let specs = vec![
            ConstraintSpec::Nullability {
                max_null_ratio: Some(0.1),
                max_null_count: None,
            },
            ConstraintSpec::MaximumValue { max_value: 10.0 },
            ConstraintSpec::RegexPattern {
                pattern: "@".to_string(),
            },
            ConstraintSpec::ValueSet {
                allowed_values: vec![json!("a"), json!(1), json!(2.5)],
            },
            ConstraintSpec::RowCount {
                min_rows: Some(1),
                max_rows: None,
            },
        ];

        for spec in &specs {
            let constraint = Constraint::from_spec("col", spec).expect("spec should construct");
            assert_eq!(constraint.kind(), spec.kind());
        }
    }

    #[test]
    fn test_from_spec_rejects_non_scalar_allowed_value() {
        let spec = ConstraintSpec::ValueSet {
            allowed_values: vec![json!(["nested"])],
        };
        let err = Constraint::from_spec("col", &spec).unwrap_err();
        assert!(matches!(err, ConfigError::NonScalarAllowedValue { .. }));
    }
}
