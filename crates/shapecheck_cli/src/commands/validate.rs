use anyhow::{Context, Result};
use shapecheck_core::{Schema, ValidationContext};
use shapecheck_parser::{parse_data_file, parse_schema_file};
use shapecheck_validator::{ObjectValidator, ValidationError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::output::{self, DocumentReport, OutputFormat, Outcome};

pub async fn execute(
    schema_path: &Path,
    data_paths: &[PathBuf],
    open: bool,
    format: OutputFormat,
) -> Result<()> {
    info!("Validating {} document(s) against {}", data_paths.len(), schema_path.display());
    info!("Closed schema: {}", !open);

    let document = parse_schema_file(schema_path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path.display()))?;

    if format == OutputFormat::Text {
        output::print_info(&format!(
            "Schema loaded: {} v{} ({} fields)",
            document.name,
            document.version,
            document.fields.len()
        ));
    }

    let context = ValidationContext::new()
        .with_allow_schema_keys_only(document.allow_schema_keys_only && !open);
    let schema = Arc::new(document.fields.clone());
    let context = Arc::new(context);

    // One blocking task per document; each task owns its own report.
    let mut tasks = JoinSet::new();
    for (index, path) in data_paths.iter().cloned().enumerate() {
        let schema = Arc::clone(&schema);
        let context = Arc::clone(&context);
        tasks.spawn_blocking(move || (index, check_document(&path, &schema, &context)));
    }

    let mut slots: Vec<Option<DocumentReport>> = data_paths.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, report) = joined.context("Validation task panicked")?;
        slots[index] = Some(report);
    }
    let reports: Vec<DocumentReport> = slots.into_iter().flatten().collect();

    output::print_validation_report(&document, &reports, format)?;

    if reports.iter().any(|r| !r.passed()) {
        std::process::exit(1);
    }

    Ok(())
}

/// Loads one data document and validates it.
fn check_document(path: &Path, schema: &Schema, context: &ValidationContext) -> DocumentReport {
    let display_path = path.display().to_string();
    debug!("Checking document {}", display_path);

    let outcome = match parse_data_file(path) {
        Err(err) => Outcome::Error(format!("Failed to parse data file: {}", err)),
        Ok(value) => match ObjectValidator::new().validate_with_context(&value, schema, context) {
            Ok(()) => Outcome::Passed,
            Err(ValidationError::Failed(failure)) => Outcome::Failed(failure.violations),
            Err(err @ ValidationError::Configuration(_)) => Outcome::Error(err.to_string()),
        },
    };

    DocumentReport {
        path: display_path,
        outcome,
    }
}
