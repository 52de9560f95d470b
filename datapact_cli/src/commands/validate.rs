use anyhow::{Context, Result};
use datapact_validator::SchemaValidator;
use std::path::Path;
use tracing::info;

use crate::{data, output};

pub fn execute(schema_path: &str, data_path: &str, format: &str) -> Result<()> {
    info!("Validating dataset: {}", data_path);

    let schema = datapact_parser::parse_file(Path::new(schema_path))
        .with_context(|| format!("Failed to parse schema file: {schema_path}"))?;

    let validator = SchemaValidator::from_schema(&schema)
        .with_context(|| format!("Invalid schema configuration: {schema_path}"))?;

    output::print_info(&format!(
        "Schema loaded: {} field(s), {} constraint(s)",
        schema.fields.len(),
        validator.constraints().len()
    ));

    let dataset = data::load_dataset(Path::new(data_path), &schema)
        .with_context(|| format!("Failed to load data file: {data_path}"))?;

    output::print_info(&format!(
        "Dataset loaded: {} row(s), {} column(s)",
        dataset.height(),
        dataset.width()
    ));

    let result = validator.check(&dataset);
    output::print_validation_result(&result, format);

    if !result.passed() {
        std::process::exit(1);
    }

    Ok(())
}
