//! Options for a validation call.

/// Context for validation operations.
///
/// Engine options live here rather than on the schema, so a schema value is
/// never modified to change how it is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationContext {
    /// Reject root-level keys that the schema does not declare
    pub allow_schema_keys_only: bool,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            allow_schema_keys_only: true,
        }
    }
}

impl ValidationContext {
    /// Creates a new validation context with default settings (closed schema).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets closed-schema mode for the root object.
    pub fn with_allow_schema_keys_only(mut self, allow_schema_keys_only: bool) -> Self {
        self.allow_schema_keys_only = allow_schema_keys_only;
        self
    }
}
