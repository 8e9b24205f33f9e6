//! Error types for validation operations.

use crate::Violation;
use shapecheck_core::{ConfigurationError, Schema};
use thiserror::Error;

/// Result type for validation operations.
pub type ValidationResult<T = ()> = std::result::Result<T, ValidationError>;

/// Errors that can occur during validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The schema is malformed; no violations were collected
    #[error("Invalid schema: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The object does not conform to the schema
    #[error("Validation failed with {} violation(s)", .0.violations.len())]
    Failed(ValidationFailure),
}

impl ValidationError {
    /// Returns the failure report if the object did not conform.
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Configuration(_) => None,
        }
    }

    /// Returns the collected violations, empty for configuration errors.
    pub fn violations(&self) -> &[Violation] {
        self.failure()
            .map(|f| f.violations.as_slice())
            .unwrap_or_default()
    }
}

/// The complete report for an object that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    /// Every violation found, never just the first
    pub violations: Vec<Violation>,

    /// The schema the object was checked against
    pub schema: Schema,
}
