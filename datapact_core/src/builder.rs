//! Builder for assembling schemas in code.
//!
//! Most schemas are loaded from JSON files, but tests and embedding
//! applications often want to declare them programmatically. The builder
//! keeps field declaration order, exactly like the parsed form.

use crate::{ConstraintSpec, FieldDef, Schema};
use indexmap::IndexMap;

/// Fluent builder for a [`Schema`].
///
/// # Example
///
/// ```rust
/// use datapact_core::{ConstraintSpec, SchemaBuilder};
///
/// let schema = SchemaBuilder::new()
///     .field("user_id", "Int64")
///     .field_with_constraints(
///         "status",
///         "String",
///         vec![ConstraintSpec::ValueSet {
///             allowed_values: vec!["active".into(), "inactive".into()],
///         }],
///     )
///     .build();
///
/// assert_eq!(schema.fields.len(), 2);
/// assert_eq!(schema.constraint_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: IndexMap<String, FieldDef>,
}

impl SchemaBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field with no constraints (type-only validation).
    pub fn field(self, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        self.field_with_constraints(name, field_type, Vec::new())
    }

    /// Declares a field with the given constraint specifications.
    ///
    /// Re-declaring a name replaces the earlier definition but keeps its
    /// position in the declaration order.
    pub fn field_with_constraints(
        mut self,
        name: impl Into<String>,
        field_type: impl Into<String>,
        constraints: Vec<ConstraintSpec>,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldDef {
                field_type: field_type.into(),
                constraints,
            },
        );
        self
    }

    /// Builds the schema.
    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
        }
    }
}
