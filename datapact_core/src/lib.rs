//! # Datapact Core
//!
//! Core data structures and types for datapact, a schema-driven validator
//! for tabular datasets.
//!
//! This crate provides the building blocks shared by the parser and the
//! validation engine:
//!
//! - **Schema**: the declarative description of a dataset (field names,
//!   declared types, constraint specifications)
//! - **CheckOutcome / ValidationResult**: structured outcomes of type checks
//!   and constraint evaluations
//! - **ConfigError / ValidationError**: the two error tiers (configuration
//!   mistakes vs. data-quality findings)
//!
//! ## Example
//!
//! ```rust
//! use datapact_core::{ConstraintSpec, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .field("user_id", "Int64")
//!     .field_with_constraints(
//!         "age",
//!         "Int64",
//!         vec![ConstraintSpec::MaximumValue { max_value: 120.0 }],
//!     )
//!     .build();
//!
//! assert_eq!(schema.fields.len(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod outcome;
pub mod schema;

pub use builder::*;
pub use error::*;
pub use outcome::*;
pub use schema::*;
