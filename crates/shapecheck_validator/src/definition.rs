//! Schema well-formedness checks.
//!
//! The engine reports configuration errors lazily, when it reaches the
//! offending node with a value in hand. These checks walk the whole schema up
//! front instead, so a schema can be vetted before any data exists.

use crate::fields::check_date_format;
use shapecheck_core::{ConfigurationError, FieldKind, Schema, SchemaNode};
use std::collections::HashSet;
use tracing::debug;

/// Checks a schema and returns the first configuration error found.
///
/// # Example
///
/// ```rust
/// use shapecheck_core::{SchemaBuilder, date, string};
/// use shapecheck_validator::validate_definition;
///
/// let schema = SchemaBuilder::new()
///     .field("name", string().required())
///     .field("created", date().format("%Y-%m-%d"))
///     .build();
///
/// assert!(validate_definition(&schema).is_ok());
/// ```
pub fn validate_definition(schema: &Schema) -> Result<(), ConfigurationError> {
    match definition_errors(schema).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Walks a schema and returns every configuration error, in declaration order.
pub fn definition_errors(schema: &Schema) -> Vec<ConfigurationError> {
    let mut errors = Vec::new();

    if schema.is_empty() {
        errors.push(ConfigurationError::EmptySchema);
        return errors;
    }

    check_schema(schema, &mut errors);
    debug!(errors = errors.len(), "Checked schema definition");
    errors
}

fn check_schema(schema: &Schema, errors: &mut Vec<ConfigurationError>) {
    let mut seen = HashSet::new();

    for field in schema.fields() {
        if !seen.insert(field.name.as_str()) {
            errors.push(ConfigurationError::DuplicateField(field.name.clone()));
        }
        check_node(&field.name, &field.node, errors);
    }
}

fn check_node(field: &str, node: &SchemaNode, errors: &mut Vec<ConfigurationError>) {
    match &node.kind {
        FieldKind::Number(c) => {
            if let Some(range) = &c.num_range {
                if range.len() != 2 {
                    errors.push(ConfigurationError::InvalidNumRange {
                        field: field.to_string(),
                        len: range.len(),
                    });
                }
            }
        }
        FieldKind::Date(c) => {
            if let Err(err) = check_date_format(field, &c.format) {
                errors.push(err);
            }
        }
        FieldKind::Object(c) => match &c.object_schema {
            Some(schema) if schema.is_empty() => {
                errors.push(ConfigurationError::EmptyObjectSchema {
                    field: field.to_string(),
                });
            }
            Some(schema) => check_schema(schema, errors),
            None => {}
        },
        FieldKind::Array(c) => {
            if let Some(item) = &c.valid_array_schema {
                check_node(field, item, errors);
            }
        }
        FieldKind::String(_) | FieldKind::Ip(_) | FieldKind::Boolean | FieldKind::Null => {}
    }
}
