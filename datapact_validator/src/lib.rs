//! # Datapact Validator
//!
//! Constraint evaluation engine for datapact. This crate validates tabular
//! datasets against declarative schemas:
//!
//! - Field type checks (declared type names vs. actual column types,
//!   including alias classes)
//! - Twelve constraint kinds (nullability, uniqueness, value bounds,
//!   statistical bounds, string length, regex patterns, value sets,
//!   row count) evaluated independently over a columnar dataset
//! - One [`ValidationResult`](datapact_core::ValidationResult) per pass,
//!   with every failing check collected
//!
//! ## Example
//!
//! ```rust
//! use datapact_validator::{Column, Constraint, Dataset, SchemaValidator};
//!
//! let dataset = Dataset::from_columns([
//!     ("age".to_string(), Column::from(vec![25i64, 150])),
//! ])
//! .unwrap();
//!
//! let validator = SchemaValidator::new(vec![
//!     Constraint::maximum_value("age", 120.0),
//! ]);
//!
//! // Non-raising path: inspect the result.
//! let result = validator.check(&dataset);
//! assert!(!result.passed());
//!
//! // Raising path: the same outcomes, surfaced as an error.
//! assert!(validator.validate(&dataset).is_err());
//! ```
//!
//! Schemas parsed from JSON files compose with
//! [`SchemaValidator::from_schema`]:
//!
//! ```rust
//! use datapact_parser::parse_str;
//! use datapact_validator::SchemaValidator;
//!
//! let schema = parse_str(r#"{
//!     "fields": {
//!         "age": {
//!             "type": "Int64",
//!             "constraints": [{"type": "maximum_value", "max_value": 120}]
//!         }
//!     }
//! }"#).unwrap();
//!
//! let validator = SchemaValidator::from_schema(&schema).unwrap();
//! assert_eq!(validator.constraints().len(), 1);
//! ```

mod constraints;
mod dataset;
mod engine;
mod types;

pub use constraints::*;
pub use dataset::*;
pub use engine::*;
pub use types::*;
