//! Violation records.
//!
//! One [`Violation`] is produced per detected nonconformance. Each variant
//! carries the offending key plus the expected and actual context needed to
//! render a readable report.

use serde::Serialize;
use thiserror::Error;

/// A single detected nonconformance between a value and its schema.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A required key is absent
    #[error("The property {key} is required and it's missing")]
    MissingRequired { key: String },

    /// The value is not of the declared type
    #[error("The property {field} data type is invalid, required {expected} got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// String shorter than `minLength`
    #[error("The property {field} has a minimum length of {min}, got {actual}")]
    MinLength {
        field: String,
        min: usize,
        actual: usize,
    },

    /// String longer than `maxLength`
    #[error("The property {field} has a maximum length of {max}, got {actual}")]
    MaxLength {
        field: String,
        max: usize,
        actual: usize,
    },

    /// Value not in the allowed set
    #[error("The property {field} can be only one of the options [{}], got {value}", .options.join(", "))]
    NotInOptions {
        field: String,
        value: String,
        options: Vec<String>,
    },

    /// String does not look like an email address
    #[error("The property {field} is an invalid email, got {value}")]
    InvalidEmail { field: String, value: String },

    /// String contains characters other than ASCII letters and digits
    #[error("The property {field} may contain only letters and numbers, got {value}")]
    NotAlphanumeric { field: String, value: String },

    /// Number below `minNum`
    #[error("The property {field} has a minimum number of {min}, got {actual}")]
    BelowMinimum { field: String, min: f64, actual: f64 },

    /// Number above `maxNum`
    #[error("The property {field} has a maximum number of {max}, got {actual}")]
    AboveMaximum { field: String, max: f64, actual: f64 },

    /// Number outside `numRange` (min exclusive, max inclusive)
    #[error("The property {field} has a number range between {min} to {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    /// String does not round-trip under the date pattern
    #[error("The property {field} is an invalid date, required format '{format}' got '{value}'")]
    InvalidDate {
        field: String,
        format: String,
        value: String,
    },

    /// String is not an IPv4 dotted quad
    #[error("The property {field} is an invalid ip address, got {value}")]
    InvalidIp { field: String, value: String },

    /// Key present on the object but not declared in the schema
    #[error("The property {key} is not a part of the object schema, allowed keys: [{}]", .allowed_keys.join(", "))]
    UnexpectedKey {
        key: String,
        allowed_keys: Vec<String>,
    },

    /// A nested object is missing a required property
    #[error("The property {field} requires property {property}")]
    RequiredProperty { field: String, property: String },

    /// A nested object carries a key its schema does not declare
    #[error("The key {key} is not a part of the {field} schema, allowed keys: [{}]", .allowed_keys.join(", "))]
    KeyNotInSchema {
        field: String,
        key: String,
        allowed_keys: Vec<String>,
    },

    /// One array element failed; carries that element's own violations
    #[error("Array element {index} of {field} is invalid ({} violation(s))", .violations.len())]
    InvalidArrayElement {
        field: String,
        index: usize,
        violations: Vec<Violation>,
    },
}

impl Violation {
    /// Creates a missing required key violation.
    pub fn missing_required(key: impl Into<String>) -> Self {
        Self::MissingRequired { key: key.into() }
    }

    /// Creates a type mismatch violation.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates an option membership violation.
    pub fn not_in_options(
        field: impl Into<String>,
        value: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self::NotInOptions {
            field: field.into(),
            value: value.into(),
            options,
        }
    }

    /// Returns the key this violation is reported against.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequired { key } | Self::UnexpectedKey { key, .. } => key,
            Self::TypeMismatch { field, .. }
            | Self::MinLength { field, .. }
            | Self::MaxLength { field, .. }
            | Self::NotInOptions { field, .. }
            | Self::InvalidEmail { field, .. }
            | Self::NotAlphanumeric { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::InvalidIp { field, .. }
            | Self::RequiredProperty { field, .. }
            | Self::KeyNotInSchema { field, .. }
            | Self::InvalidArrayElement { field, .. } => field,
        }
    }

    /// Re-expresses a violation raised inside the object held by `parent`.
    ///
    /// Missing keys and unexpected keys are attributed to the parent field;
    /// every other violation passes through unchanged.
    pub fn relabel(self, parent: &str) -> Self {
        match self {
            Self::MissingRequired { key } => Self::RequiredProperty {
                field: parent.to_string(),
                property: key,
            },
            Self::UnexpectedKey { key, allowed_keys } => Self::KeyNotInSchema {
                field: parent.to_string(),
                key,
                allowed_keys,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages() {
        assert_eq!(
            Violation::missing_required("id").to_string(),
            "The property id is required and it's missing"
        );
        assert_eq!(
            Violation::type_mismatch("age", "number", "string").to_string(),
            "The property age data type is invalid, required number got string"
        );
        assert_eq!(
            Violation::OutOfRange {
                field: "age".into(),
                min: 10.0,
                max: 35.0,
                actual: 10.0,
            }
            .to_string(),
            "The property age has a number range between 10 to 35, got 10"
        );
        assert_eq!(
            Violation::UnexpectedKey {
                key: "b".into(),
                allowed_keys: vec!["a".into(), "c".into()],
            }
            .to_string(),
            "The property b is not a part of the object schema, allowed keys: [a, c]"
        );
    }

    #[test]
    fn test_relabel_required() {
        let relabelled = Violation::missing_required("city").relabel("addr");
        assert_eq!(
            relabelled,
            Violation::RequiredProperty {
                field: "addr".into(),
                property: "city".into(),
            }
        );
        assert_eq!(relabelled.to_string(), "The property addr requires property city");
    }

    #[test]
    fn test_relabel_unexpected_key() {
        let relabelled = Violation::UnexpectedKey {
            key: "zip".into(),
            allowed_keys: vec!["city".into()],
        }
        .relabel("addr");

        assert_eq!(relabelled.field(), "addr");
        assert_eq!(
            relabelled.to_string(),
            "The key zip is not a part of the addr schema, allowed keys: [city]"
        );
    }

    #[test]
    fn test_relabel_passes_others_through() {
        let original = Violation::type_mismatch("city", "string", "number");
        assert_eq!(original.clone().relabel("addr"), original);
    }

    #[test]
    fn test_serialize_tagged() {
        let value = serde_json::to_value(Violation::missing_required("id")).unwrap();
        assert_eq!(value, serde_json::json!({"kind": "missing_required", "key": "id"}));
    }
}
