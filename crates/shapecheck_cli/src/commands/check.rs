use anyhow::{Context, Result, bail};
use shapecheck_parser::parse_schema_file;
use shapecheck_validator::definition_errors;
use std::path::Path;
use tracing::info;

use crate::output::{self, OutputFormat};

pub async fn execute(schema_path: &Path, format: OutputFormat) -> Result<()> {
    info!("Checking schema: {}", schema_path.display());

    let document = parse_schema_file(schema_path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path.display()))?;

    if format == OutputFormat::Text {
        output::print_info(&format!(
            "Schema loaded: {} v{}",
            document.name, document.version
        ));
    }

    let errors = definition_errors(&document.fields);
    output::print_definition_report(&document, &errors, format)?;

    if !errors.is_empty() {
        bail!(
            "Schema '{}' has {} definition error(s)",
            document.name,
            errors.len()
        );
    }

    Ok(())
}
