//! Loader for shapecheck schema and data documents (YAML/TOML/JSON formats).
//!
//! This module parses schema documents into the strongly-typed
//! [`SchemaDocument`] structure and candidate data into [`DataValue`] trees.
//!
//! # Example
//!
//! ```rust
//! use shapecheck_parser::parse_schema_yaml;
//!
//! let yaml = r#"
//! name: signup
//! description: Signup form payload
//! fields:
//!   - name: id
//!     type: number
//!     required: true
//!     minNum: 1
//!   - name: email
//!     type: string
//!     required: true
//!     isEmail: true
//! "#;
//!
//! let document = parse_schema_yaml(yaml).expect("Failed to parse schema");
//! assert_eq!(document.name, "signup");
//! assert_eq!(document.fields.len(), 2);
//! ```

use shapecheck_core::{DataMap, DataValue, SchemaDocument};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading documents.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported document file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a schema document from a YAML string.
pub fn parse_schema_yaml(content: &str) -> Result<SchemaDocument> {
    let document: SchemaDocument = serde_yaml_ng::from_str(content)?;
    Ok(document)
}

/// Parse a schema document from a TOML string.
///
/// # Example
///
/// ```rust
/// use shapecheck_parser::parse_schema_toml;
///
/// let toml = r#"
/// name = "login"
/// allowSchemaKeysOnly = false
///
/// [[fields]]
/// name = "username"
/// type = "string"
/// required = true
/// textAndNumbers = true
/// "#;
///
/// let document = parse_schema_toml(toml).unwrap();
/// assert!(!document.allow_schema_keys_only);
/// ```
pub fn parse_schema_toml(content: &str) -> Result<SchemaDocument> {
    let document: SchemaDocument =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(document)
}

/// Parse a schema document from a JSON string.
pub fn parse_schema_json(content: &str) -> Result<SchemaDocument> {
    let document: SchemaDocument = serde_json::from_str(content)?;
    Ok(document)
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `FileFormat::Yaml`
/// * `.toml` → `FileFormat::Toml`
/// * `.json` → `FileFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "toml" => Ok(FileFormat::Toml),
        "json" => Ok(FileFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema document from a file with automatic format detection.
///
/// ```no_run
/// use shapecheck_parser::parse_schema_file;
/// use std::path::Path;
///
/// let document = parse_schema_file(Path::new("schemas/signup.yml")).unwrap();
/// println!("Loaded schema: {}", document.name);
/// ```
pub fn parse_schema_file(path: &Path) -> Result<SchemaDocument> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, "Parsing schema file");

    match format {
        FileFormat::Yaml => parse_schema_yaml(&content),
        FileFormat::Toml => parse_schema_toml(&content),
        FileFormat::Json => parse_schema_json(&content),
    }
}

/// Parse a data document from a YAML string.
pub fn parse_data_yaml(content: &str) -> Result<DataValue> {
    let value: DataValue = serde_yaml_ng::from_str(content)?;
    Ok(value)
}

/// Parse a data document from a JSON string.
///
/// Integers that fit in an `i64` stay integers; everything else numeric is a float.
pub fn parse_data_json(content: &str) -> Result<DataValue> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(DataValue::from(value))
}

/// Parse a data document from a TOML string.
///
/// TOML datetimes become strings in their RFC 3339 spelling, so they can be
/// checked by `date` fields.
pub fn parse_data_toml(content: &str) -> Result<DataValue> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(from_toml(toml::Value::Table(table)))
}

fn from_toml(value: toml::Value) -> DataValue {
    match value {
        toml::Value::String(s) => DataValue::String(s),
        toml::Value::Integer(i) => DataValue::Int(i),
        toml::Value::Float(f) => DataValue::Float(f),
        toml::Value::Boolean(b) => DataValue::Bool(b),
        toml::Value::Datetime(dt) => DataValue::String(dt.to_string()),
        toml::Value::Array(items) => DataValue::List(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => DataValue::Map(
            table
                .into_iter()
                .map(|(k, v)| (k, from_toml(v)))
                .collect::<DataMap>(),
        ),
    }
}

/// Parse a data document from a file with automatic format detection.
pub fn parse_data_file(path: &Path) -> Result<DataValue> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, "Parsing data file");

    match format {
        FileFormat::Yaml => parse_data_yaml(&content),
        FileFormat::Toml => parse_data_toml(&content),
        FileFormat::Json => parse_data_json(&content),
    }
}

/// Serialize a schema document to YAML.
pub fn to_yaml(document: &SchemaDocument) -> Result<String> {
    Ok(serde_yaml_ng::to_string(document)?)
}
