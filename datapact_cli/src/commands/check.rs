use anyhow::{Context, Result};
use datapact_validator::SchemaValidator;
use std::path::Path;

use crate::output;

pub fn execute(schema_path: &str) -> Result<()> {
    let schema = datapact_parser::parse_file(Path::new(schema_path))
        .with_context(|| format!("Failed to parse schema file: {schema_path}"))?;

    let validator = SchemaValidator::from_schema(&schema)
        .with_context(|| format!("Invalid schema configuration: {schema_path}"))?;

    output::print_success(&format!(
        "Schema OK: {} field(s), {} constraint(s)",
        schema.fields.len(),
        validator.constraints().len()
    ));

    Ok(())
}
