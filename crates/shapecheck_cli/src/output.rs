use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use serde_json::{Value, json};
use shapecheck_core::{ConfigurationError, SchemaDocument};
use shapecheck_validator::Violation;
use std::collections::BTreeMap;

/// How reports are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// What happened to one data document.
#[derive(Debug)]
pub enum Outcome {
    Passed,
    Failed(Vec<Violation>),
    /// The document could not be checked at all (unreadable file, bad schema)
    Error(String),
}

#[derive(Debug)]
pub struct DocumentReport {
    pub path: String,
    pub outcome: Outcome,
}

impl DocumentReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed)
    }

    fn violations(&self) -> &[Violation] {
        match &self.outcome {
            Outcome::Failed(violations) => violations,
            _ => &[],
        }
    }
}

pub fn print_validation_report(
    schema: &SchemaDocument,
    reports: &[DocumentReport],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json_report(schema, reports),
        OutputFormat::Text => {
            print_text_report(reports);
            Ok(())
        }
    }
}

fn print_text_report(reports: &[DocumentReport]) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    for report in reports {
        match &report.outcome {
            Outcome::Passed => println!(
                "\n{} {} {}",
                "✓".green().bold(),
                report.path.bold(),
                "PASSED".green().bold()
            ),
            Outcome::Failed(violations) => {
                println!(
                    "\n{} {} {}",
                    "✗".red().bold(),
                    report.path.bold(),
                    "FAILED".red().bold()
                );
                for (i, violation) in violations.iter().enumerate() {
                    print_violation(i + 1, violation, 1);
                }
            }
            Outcome::Error(message) => {
                println!(
                    "\n{} {} {}",
                    "✗".red().bold(),
                    report.path.bold(),
                    "ERROR".red().bold()
                );
                println!("  {}", message.red());
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    let violation_count: usize = reports.iter().map(|r| r.violations().len()).sum();

    println!("\n{}", "Summary:".bold());
    println!("  Documents:        {}", reports.len());
    println!("  Passed:           {}", reports.len() - failed);
    println!("  Failed:           {}", failed);
    println!("  Total violations: {}", violation_count);
    println!("{}", "═".repeat(60));

    if failed == 0 {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }
}

fn print_violation(number: usize, violation: &Violation, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{}{}. {}", indent, number, violation.to_string().red());

    if let Violation::InvalidArrayElement { violations, .. } = violation {
        for (i, nested) in violations.iter().enumerate() {
            print_violation(i + 1, nested, depth + 1);
        }
    }
}

fn violation_json(violation: &Violation) -> Value {
    let mut value = json!(violation);
    if let Value::Object(map) = &mut value {
        map.insert("message".to_string(), json!(violation.to_string()));
        if let Violation::InvalidArrayElement { violations, .. } = violation {
            map.insert(
                "violations".to_string(),
                Value::Array(violations.iter().map(violation_json).collect()),
            );
        }
    }
    value
}

fn print_json_report(schema: &SchemaDocument, reports: &[DocumentReport]) -> Result<()> {
    let failed = reports.iter().filter(|r| !r.passed()).count();
    let violation_count: usize = reports.iter().map(|r| r.violations().len()).sum();

    let documents: Vec<Value> = reports
        .iter()
        .map(|report| {
            let error = match &report.outcome {
                Outcome::Error(message) => Some(message.as_str()),
                _ => None,
            };
            json!({
                "path": report.path,
                "passed": report.passed(),
                "violations": report.violations().iter().map(violation_json).collect::<Vec<_>>(),
                "error": error,
            })
        })
        .collect();

    let output = json!({
        "schema": schema.name,
        "version": schema.version,
        "passed": failed == 0,
        "documents": documents,
        "summary": {
            "document_count": reports.len(),
            "failed_count": failed,
            "violation_count": violation_count,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Prints the outcome of a schema definition check.
pub fn print_definition_report(
    document: &SchemaDocument,
    errors: &[ConfigurationError],
    format: OutputFormat,
) -> Result<()> {
    let by_type = field_type_counts(document);

    if format == OutputFormat::Json {
        let output = json!({
            "name": document.name,
            "version": document.version,
            "valid": errors.is_empty(),
            "errors": errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            "summary": {
                "field_count": document.fields.len(),
                "allow_schema_keys_only": document.allow_schema_keys_only,
                "field_types": by_type,
            }
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if errors.is_empty() {
        print_success("Schema definition is valid");
    } else {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.to_string().red());
        }
    }

    println!("\nSchema Summary:");
    println!("  Name:        {}", document.name);
    println!("  Version:     {}", document.version);
    println!(
        "  Description: {}",
        document.description.as_deref().unwrap_or("N/A")
    );
    println!("  Fields:      {}", document.fields.len());
    println!(
        "  Closed:      {}",
        if document.allow_schema_keys_only {
            "yes"
        } else {
            "no"
        }
    );

    let types: Vec<String> = by_type
        .iter()
        .map(|(name, count)| format!("{}: {}", name, count))
        .collect();
    println!("  Types:       {}", types.join(", "));

    Ok(())
}

fn field_type_counts(document: &SchemaDocument) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for field in document.fields.fields() {
        *counts.entry(field.node.type_name()).or_insert(0) += 1;
    }
    counts
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
