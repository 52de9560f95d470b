//! Columnar dataset representation.
//!
//! This module is the collaborator the constraint engine computes against:
//! named, typed columns with a well-defined null representation per row,
//! exposing the aggregate surface the constraints need (null count, distinct
//! count, numeric statistics, string length range, pattern mismatch count,
//! set membership). Constraints call into this module and never iterate
//! column values themselves.
//!
//! A `Dataset` is never mutated by validation; it is safe to share across
//! concurrent validation calls.

use crate::types::DataType;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A scalar value, used for allowed-value sets and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl DataValue {
    /// Converts a JSON scalar into a value. Returns `None` for null, arrays,
    /// and objects.
    pub fn from_json(value: &serde_json::Value) -> Option<DataValue> {
        match value {
            serde_json::Value::String(s) => Some(DataValue::String(s.clone())),
            serde_json::Value::Bool(b) => Some(DataValue::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(DataValue::Int(i))
                } else {
                    n.as_f64().map(DataValue::Float)
                }
            }
            _ => None,
        }
    }

    /// JSON representation of this value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DataValue::String(s) => serde_json::Value::from(s.clone()),
            DataValue::Int(i) => serde_json::Value::from(*i),
            DataValue::Float(f) => serde_json::Value::from(*f),
            DataValue::Bool(b) => serde_json::Value::from(*b),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) => write!(f, "{s}"),
            DataValue::Int(i) => write!(f, "{i}"),
            DataValue::Float(v) => write!(f, "{v}"),
            DataValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

/// A typed column of N rows; `None` is the null representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int32(Vec<Option<i32>>),
    Int64(Vec<Option<i64>>),
    Float32(Vec<Option<f32>>),
    Float64(Vec<Option<f64>>),
    String(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
}

impl Column {
    /// Number of rows, nulls included.
    pub fn len(&self) -> usize {
        match self {
            Column::Int32(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Float32(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::String(v) => v.len(),
            Column::Boolean(v) => v.len(),
        }
    }

    /// True if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolved data type of this column.
    pub fn dtype(&self) -> DataType {
        match self {
            Column::Int32(_) => DataType::Int32,
            Column::Int64(_) => DataType::Int64,
            Column::Float32(_) => DataType::Float32,
            Column::Float64(_) => DataType::Float64,
            Column::String(_) => DataType::String,
            Column::Boolean(_) => DataType::Boolean,
        }
    }

    /// True for integer and float columns.
    pub fn is_numeric(&self) -> bool {
        self.dtype().is_numeric()
    }

    /// True for string columns.
    pub fn is_string(&self) -> bool {
        self.dtype() == DataType::String
    }

    /// Number of null rows.
    pub fn null_count(&self) -> usize {
        match self {
            Column::Int32(v) => v.iter().filter(|x| x.is_none()).count(),
            Column::Int64(v) => v.iter().filter(|x| x.is_none()).count(),
            Column::Float32(v) => v.iter().filter(|x| x.is_none()).count(),
            Column::Float64(v) => v.iter().filter(|x| x.is_none()).count(),
            Column::String(v) => v.iter().filter(|x| x.is_none()).count(),
            Column::Boolean(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Number of distinct values. Null counts as one distinct value when
    /// present.
    pub fn n_unique(&self) -> usize {
        fn distinct<T, K: std::hash::Hash + Eq>(
            values: &[Option<T>],
            key: impl Fn(&T) -> K,
        ) -> usize {
            let mut seen = HashSet::new();
            let mut has_null = false;
            for value in values {
                match value {
                    Some(v) => {
                        seen.insert(key(v));
                    }
                    None => has_null = true,
                }
            }
            seen.len() + usize::from(has_null)
        }

        match self {
            Column::Int32(v) => distinct(v, |x| *x),
            Column::Int64(v) => distinct(v, |x| *x),
            Column::Float32(v) => distinct(v, |x| x.to_bits()),
            Column::Float64(v) => distinct(v, |x| x.to_bits()),
            Column::String(v) => distinct(v, |x| x.clone()),
            Column::Boolean(v) => distinct(v, |x| *x),
        }
    }

    /// Non-null values as f64. Empty for non-numeric columns.
    fn numeric_values(&self) -> Vec<f64> {
        match self {
            Column::Int32(v) => v.iter().flatten().map(|x| *x as f64).collect(),
            Column::Int64(v) => v.iter().flatten().map(|x| *x as f64).collect(),
            Column::Float32(v) => v.iter().flatten().map(|x| *x as f64).collect(),
            Column::Float64(v) => v.iter().flatten().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Minimum over non-null values. `None` if there are none.
    pub fn min(&self) -> Option<f64> {
        self.numeric_values().into_iter().reduce(f64::min)
    }

    /// Maximum over non-null values. `None` if there are none.
    pub fn max(&self) -> Option<f64> {
        self.numeric_values().into_iter().reduce(f64::max)
    }

    /// Arithmetic mean over non-null values.
    pub fn mean(&self) -> Option<f64> {
        let values = self.numeric_values();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Median over non-null values (the two middle values are averaged for
    /// even counts).
    pub fn median(&self) -> Option<f64> {
        let mut values = self.numeric_values();
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = values.len() / 2;
        if values.len() % 2 == 0 {
            Some((values[mid - 1] + values[mid]) / 2.0)
        } else {
            Some(values[mid])
        }
    }

    /// Quantile at `p` (0.0 to 1.0) over non-null values, nearest-rank.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        let mut values = self.numeric_values();
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let rank = (p * (values.len() - 1) as f64).round() as usize;
        Some(values[rank.min(values.len() - 1)])
    }

    /// Sample standard deviation over non-null values. `None` with fewer
    /// than two values (the statistic is undefined).
    pub fn std(&self) -> Option<f64> {
        let values = self.numeric_values();
        if values.len() < 2 {
            return None;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (values.len() - 1) as f64;
        Some(variance.sqrt())
    }

    /// Character-length range over non-null string values. `None` if the
    /// column has no non-null values (or is not a string column).
    pub fn str_length_range(&self) -> Option<(usize, usize)> {
        let Column::String(values) = self else {
            return None;
        };
        values
            .iter()
            .flatten()
            .map(|s| s.chars().count())
            .fold(None, |range, len| match range {
                None => Some((len, len)),
                Some((lo, hi)) => Some((lo.min(len), hi.max(len))),
            })
    }

    /// Number of non-null string values that contain no match for the
    /// pattern. Nulls are treated as matching. Zero for non-string columns.
    pub fn count_not_matching(&self, pattern: &regex::Regex) -> usize {
        let Column::String(values) = self else {
            return 0;
        };
        values
            .iter()
            .flatten()
            .filter(|s| !pattern.is_match(s))
            .count()
    }

    /// Membership check against an allowed set: returns the number of
    /// non-null rows whose value is outside the set, and the distinct
    /// offending values in first-appearance order. Nulls are treated as
    /// valid.
    pub fn not_in(&self, allowed: &[DataValue]) -> (usize, Vec<DataValue>) {
        let mut invalid_count = 0;
        let mut invalid_values: Vec<DataValue> = Vec::new();
        let mut record = |value: DataValue| {
            invalid_count += 1;
            if !invalid_values.contains(&value) {
                invalid_values.push(value);
            }
        };

        match self {
            Column::String(values) => {
                let allowed: Vec<&str> = allowed
                    .iter()
                    .filter_map(|v| match v {
                        DataValue::String(s) => Some(s.as_str()),
                        _ => None,
                    })
                    .collect();
                for value in values.iter().flatten() {
                    if !allowed.contains(&value.as_str()) {
                        record(DataValue::String(value.clone()));
                    }
                }
            }
            Column::Int32(values) => {
                let allowed = allowed_ints(allowed);
                for value in values.iter().flatten() {
                    if !allowed.contains(&(*value as i64)) {
                        record(DataValue::Int(*value as i64));
                    }
                }
            }
            Column::Int64(values) => {
                let allowed = allowed_ints(allowed);
                for value in values.iter().flatten() {
                    if !allowed.contains(value) {
                        record(DataValue::Int(*value));
                    }
                }
            }
            Column::Float32(values) => {
                let allowed = allowed_floats(allowed);
                for value in values.iter().flatten() {
                    if !allowed.contains(&(*value as f64)) {
                        record(DataValue::Float(*value as f64));
                    }
                }
            }
            Column::Float64(values) => {
                let allowed = allowed_floats(allowed);
                for value in values.iter().flatten() {
                    if !allowed.contains(value) {
                        record(DataValue::Float(*value));
                    }
                }
            }
            Column::Boolean(values) => {
                let allowed: Vec<bool> = allowed
                    .iter()
                    .filter_map(|v| match v {
                        DataValue::Bool(b) => Some(*b),
                        _ => None,
                    })
                    .collect();
                for value in values.iter().flatten() {
                    if !allowed.contains(value) {
                        record(DataValue::Bool(*value));
                    }
                }
            }
        }

        (invalid_count, invalid_values)
    }
}

/// Allowed values usable against an integer column.
fn allowed_ints(allowed: &[DataValue]) -> Vec<i64> {
    allowed
        .iter()
        .filter_map(|v| match v {
            DataValue::Int(i) => Some(*i),
            DataValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        })
        .collect()
}

/// Allowed values usable against a float column.
fn allowed_floats(allowed: &[DataValue]) -> Vec<f64> {
    allowed
        .iter()
        .filter_map(|v| match v {
            DataValue::Int(i) => Some(*i as f64),
            DataValue::Float(f) => Some(*f),
            _ => None,
        })
        .collect()
}

impl From<Vec<i32>> for Column {
    fn from(values: Vec<i32>) -> Self {
        Column::Int32(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<i32>>> for Column {
    fn from(values: Vec<Option<i32>>) -> Self {
        Column::Int32(values)
    }
}

impl From<Vec<i64>> for Column {
    fn from(values: Vec<i64>) -> Self {
        Column::Int64(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<i64>>> for Column {
    fn from(values: Vec<Option<i64>>) -> Self {
        Column::Int64(values)
    }
}

impl From<Vec<f32>> for Column {
    fn from(values: Vec<f32>) -> Self {
        Column::Float32(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<f32>>> for Column {
    fn from(values: Vec<Option<f32>>) -> Self {
        Column::Float32(values)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Float64(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<f64>>> for Column {
    fn from(values: Vec<Option<f64>>) -> Self {
        Column::Float64(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::String(values.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<Option<&str>>> for Column {
    fn from(values: Vec<Option<&str>>) -> Self {
        Column::String(
            values
                .into_iter()
                .map(|s| s.map(|s| s.to_string()))
                .collect(),
        )
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::String(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<String>>> for Column {
    fn from(values: Vec<Option<String>>) -> Self {
        Column::String(values)
    }
}

impl From<Vec<bool>> for Column {
    fn from(values: Vec<bool>) -> Self {
        Column::Boolean(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<bool>>> for Column {
    fn from(values: Vec<Option<bool>>) -> Self {
        Column::Boolean(values)
    }
}

/// Errors raised while assembling a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Column lengths must agree across the dataset
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Column names must be unique
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
}

/// An immutable collection of equally-sized named columns.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: IndexMap<String, Column>,
}

impl Dataset {
    /// Creates an empty dataset (zero columns, zero rows).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset from name/column pairs.
    pub fn from_columns(
        columns: impl IntoIterator<Item = (String, Column)>,
    ) -> Result<Self, DatasetError> {
        let mut dataset = Self::new();
        for (name, column) in columns {
            dataset.insert(name, column)?;
        }
        Ok(dataset)
    }

    /// Adds a column, enforcing the uniform row count.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), DatasetError> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(DatasetError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && column.len() != self.height() {
            return Err(DatasetError::ColumnLengthMismatch {
                column: name,
                expected: self.height(),
                actual: column.len(),
            });
        }
        self.columns.insert(name, column);
        Ok(())
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.columns.values().next().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_null_count_and_len() {
        let column = Column::from(vec![Some(1i64), None, Some(3), None]);
        assert_eq!(column.len(), 4);
        assert_eq!(column.null_count(), 2);
    }

    #[test]
    fn test_n_unique_counts_null_once() {
        let column = Column::from(vec![Some(1i64), Some(2), Some(3), None, None]);
        assert_eq!(column.n_unique(), 4);

        let no_nulls = Column::from(vec![1i64, 1, 1, 2, 2]);
        assert_eq!(no_nulls.n_unique(), 2);
    }

    #[test]
    fn test_min_max_mean_exclude_nulls() {
        let column = Column::from(vec![Some(1i64), None, Some(5), Some(3)]);
        assert_eq!(column.min(), Some(1.0));
        assert_eq!(column.max(), Some(5.0));
        assert_eq!(column.mean(), Some(3.0));
    }

    #[test]
    fn test_all_null_aggregates_are_none() {
        let column = Column::from(vec![None::<i64>, None, None]);
        assert_eq!(column.min(), None);
        assert_eq!(column.max(), None);
        assert_eq!(column.mean(), None);
        assert_eq!(column.median(), None);
        assert_eq!(column.quantile(0.5), None);
        assert_eq!(column.std(), None);
    }

    #[test]
    fn test_median_even_and_odd() {
        let odd = Column::from(vec![3.0, 1.0, 2.0]);
        assert_eq!(odd.median(), Some(2.0));

        let even = Column::from(vec![4.0, 1.0, 3.0, 2.0]);
        assert_eq!(even.median(), Some(2.5));
    }

    #[test]
    fn test_quantile_nearest_rank() {
        let column = Column::from(vec![10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(column.quantile(0.0), Some(10.0));
        assert_eq!(column.quantile(0.5), Some(30.0));
        assert_eq!(column.quantile(1.0), Some(50.0));
        assert_eq!(column.quantile(0.9), Some(50.0));
    }

    #[test]
    fn test_sample_std() {
        let column = Column::from(vec![1i64, 2, 3, 4, 5]);
        let std = column.std().unwrap();
        assert!((std - 1.5811388300841898).abs() < 1e-12);

        let constant = Column::from(vec![10i64, 10, 10]);
        assert_eq!(constant.std(), Some(0.0));

        let single = Column::from(vec![10i64]);
        assert_eq!(single.std(), None);
    }

    #[test]
    fn test_str_length_range_counts_chars() {
        let column = Column::from(vec![Some("abc"), None, Some("hé")]);
        assert_eq!(column.str_length_range(), Some((2, 3)));

        let all_null = Column::from(vec![None::<&str>, None]);
        assert_eq!(all_null.str_length_range(), None);
    }

    #[test]
    fn test_count_not_matching_skips_nulls() {
        let pattern = regex::Regex::new("@").unwrap();
        let column = Column::from(vec![Some("a@b"), None, Some("nope")]);
        assert_eq!(column.count_not_matching(&pattern), 1);
    }

    #[test]
    fn test_not_in_reports_distinct_offenders() {
        let column = Column::from(vec![
            Some("active"),
            Some("cancelled"),
            Some("cancelled"),
            None,
        ]);
        let allowed = vec![DataValue::from("active"), DataValue::from("inactive")];
        let (count, values) = column.not_in(&allowed);
        assert_eq!(count, 2);
        assert_eq!(values, vec![DataValue::from("cancelled")]);
    }

    #[test]
    fn test_not_in_numeric_set_accepts_int_and_float_spellings() {
        let column = Column::from(vec![1.0f64, 2.0, 9.5]);
        let allowed = vec![DataValue::Int(1), DataValue::Float(2.0)];
        let (count, values) = column.not_in(&allowed);
        assert_eq!(count, 1);
        assert_eq!(values, vec![DataValue::Float(9.5)]);
    }

    #[test]
    fn test_dataset_enforces_uniform_height() {
        let mut dataset = Dataset::new();
        dataset.insert("a", Column::from(vec![1i64, 2])).unwrap();
        let err = dataset
            .insert("b", Column::from(vec![1i64, 2, 3]))
            .unwrap_err();
        assert!(matches!(err, DatasetError::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn test_dataset_rejects_duplicate_columns() {
        let mut dataset = Dataset::new();
        dataset.insert("a", Column::from(vec![1i64])).unwrap();
        let err = dataset.insert("a", Column::from(vec![2i64])).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateColumn(_)));
    }

    #[test]
    fn test_empty_dataset_dimensions() {
        let dataset = Dataset::new();
        assert_eq!(dataset.height(), 0);
        assert_eq!(dataset.width(), 0);
    }
}
