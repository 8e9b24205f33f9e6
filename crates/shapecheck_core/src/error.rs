//! Error types for malformed schemas.
//!
//! A [`ConfigurationError`] means the schema itself cannot be evaluated. It is
//! fatal to the current validation call and never ends up in a violation list.

use thiserror::Error;

/// The schema is malformed and cannot be used for validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// No schema fields were supplied
    #[error("Schema has no fields defined")]
    EmptySchema,

    /// A nested object schema was supplied but declares no fields
    #[error("Object schema of field '{field}' has no fields defined")]
    EmptyObjectSchema {
        /// Field carrying the empty nested schema
        field: String,
    },

    /// `numRange` is not a `[min, max]` pair
    #[error(
        "numRange of field '{field}' should be an array with 2 values, for example: [minimum, maximum], got {len} value(s)"
    )]
    InvalidNumRange {
        /// Field carrying the malformed range
        field: String,
        /// Number of values supplied
        len: usize,
    },

    /// The date pattern contains an unknown or malformed specifier
    #[error("Invalid date format '{format}' for field '{field}'")]
    InvalidDateFormat {
        /// Field carrying the pattern
        field: String,
        /// The offending pattern
        format: String,
    },

    /// The same key is declared twice in one schema
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),
}
