//! Loading column-oriented JSON data files into a dataset.
//!
//! The data file is a JSON object mapping column names to arrays of equal
//! length, with `null` as the null representation:
//!
//! ```json
//! {"age": [25, 150, null], "name": ["ada", "bob", "cyd"]}
//! ```
//!
//! Columns declared in the schema are parsed as their declared type;
//! undeclared columns fall back to inference from the first non-null value.

use anyhow::{anyhow, Result};
use datapact_core::Schema;
use datapact_validator::{Column, DataType, Dataset};
use serde_json::Value;
use std::path::Path;

/// Loads a dataset from a column-oriented JSON file.
pub fn load_dataset(path: &Path, schema: &Schema) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;

    let Some(columns) = value.as_object() else {
        return Err(anyhow!(
            "Data file must be a JSON object mapping column names to arrays"
        ));
    };

    let mut dataset = Dataset::new();
    for (name, cells) in columns {
        let Some(cells) = cells.as_array() else {
            return Err(anyhow!("Column '{name}' must be a JSON array"));
        };

        let declared = schema
            .fields
            .get(name)
            .and_then(|field| DataType::parse(&field.field_type));

        let column = match declared {
            Some(dtype) => typed_column(name, cells, dtype)?,
            None => inferred_column(name, cells)?,
        };
        dataset.insert(name.clone(), column)?;
    }

    Ok(dataset)
}

/// Builds a column of the declared type, rejecting mistyped cells.
fn typed_column(name: &str, cells: &[Value], dtype: DataType) -> Result<Column> {
    let mismatch = |row: usize, cell: &Value| {
        anyhow!("Column '{name}' row {row}: expected {dtype}, got {cell}")
    };

    Ok(match dtype {
        DataType::Int32 => {
            let mut values = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                values.push(match cell {
                    Value::Null => None,
                    _ => Some(
                        cell.as_i64()
                            .and_then(|i| i32::try_from(i).ok())
                            .ok_or_else(|| mismatch(row, cell))?,
                    ),
                });
            }
            Column::Int32(values)
        }
        DataType::Int64 => {
            let mut values = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                values.push(match cell {
                    Value::Null => None,
                    _ => Some(cell.as_i64().ok_or_else(|| mismatch(row, cell))?),
                });
            }
            Column::Int64(values)
        }
        DataType::Float32 => {
            let mut values = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                values.push(match cell {
                    Value::Null => None,
                    _ => Some(cell.as_f64().ok_or_else(|| mismatch(row, cell))? as f32),
                });
            }
            Column::Float32(values)
        }
        DataType::Float64 => {
            let mut values = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                values.push(match cell {
                    Value::Null => None,
                    _ => Some(cell.as_f64().ok_or_else(|| mismatch(row, cell))?),
                });
            }
            Column::Float64(values)
        }
        DataType::String => {
            let mut values = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                values.push(match cell {
                    Value::Null => None,
                    _ => Some(
                        cell.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| mismatch(row, cell))?,
                    ),
                });
            }
            Column::String(values)
        }
        DataType::Boolean => {
            let mut values = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                values.push(match cell {
                    Value::Null => None,
                    _ => Some(cell.as_bool().ok_or_else(|| mismatch(row, cell))?),
                });
            }
            Column::Boolean(values)
        }
    })
}

/// Infers a column type for an undeclared column from the first non-null
/// value. All-null columns become String columns.
fn inferred_column(name: &str, cells: &[Value]) -> Result<Column> {
    let dtype = cells
        .iter()
        .find_map(|cell| match cell {
            Value::Null => None,
            Value::Bool(_) => Some(DataType::Boolean),
            Value::String(_) => Some(DataType::String),
            Value::Number(n) => {
                if cells_all_integer(cells) && n.as_i64().is_some() {
                    Some(DataType::Int64)
                } else {
                    Some(DataType::Float64)
                }
            }
            _ => None,
        })
        .unwrap_or(DataType::String);

    typed_column(name, cells, dtype)
}

/// True when every non-null numeric cell is an integer.
fn cells_all_integer(cells: &[Value]) -> bool {
    cells.iter().all(|cell| match cell {
        Value::Number(n) => n.as_i64().is_some(),
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use datapact_core::SchemaBuilder;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_declared_columns_use_schema_types() {
        let schema = SchemaBuilder::new()
            .field("age", "Int64")
            .field("name", "String")
            .build();
        let file = write_temp(r#"{"age": [25, null], "name": ["ada", "bob"]}"#);

        let dataset = load_dataset(file.path(), &schema).unwrap();
        assert_eq!(dataset.height(), 2);
        assert_eq!(
            dataset.column("age").unwrap().dtype(),
            DataType::Int64
        );
        assert_eq!(dataset.column("age").unwrap().null_count(), 1);
    }

    #[test]
    fn test_undeclared_columns_are_inferred() {
        let schema = SchemaBuilder::new().build();
        let file = write_temp(r#"{"score": [1.5, 2.0], "count": [1, 2], "flag": [true, null]}"#);

        let dataset = load_dataset(file.path(), &schema).unwrap();
        assert_eq!(dataset.column("score").unwrap().dtype(), DataType::Float64);
        assert_eq!(dataset.column("count").unwrap().dtype(), DataType::Int64);
        assert_eq!(dataset.column("flag").unwrap().dtype(), DataType::Boolean);
    }

    #[test]
    fn test_mistyped_cell_is_an_error() {
        let schema = SchemaBuilder::new().field("age", "Int64").build();
        let file = write_temp(r#"{"age": [25, "not a number"]}"#);

        let err = load_dataset(file.path(), &schema).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_ragged_columns_are_rejected() {
        let schema = SchemaBuilder::new().build();
        let file = write_temp(r#"{"a": [1, 2], "b": [1, 2, 3]}"#);

        assert!(load_dataset(file.path(), &schema).is_err());
    }
}
