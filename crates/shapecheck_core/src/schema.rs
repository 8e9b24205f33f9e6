//! Schema types and structures.
//!
//! A [`Schema`] is an ordered list of named [`Field`]s. Each field carries a
//! [`SchemaNode`]: the required flag plus a [`FieldKind`] whose variant decides
//! which constraints exist for that field.

use serde::{Deserialize, Serialize};

/// Default date pattern, in strftime syntax.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn is_true(value: &bool) -> bool {
    *value
}

/// A named schema with document-level options.
///
/// This is the unit loaded from and written to schema files.
///
/// # Example
///
/// ```rust
/// use shapecheck_core::{SchemaDocument, SchemaBuilder, number, string};
///
/// let document = SchemaDocument {
///     name: "signup".to_string(),
///     version: "1.0.0".to_string(),
///     description: Some("Signup form payload".to_string()),
///     allow_schema_keys_only: true,
///     fields: SchemaBuilder::new()
///         .field("id", number().required().min(1.0))
///         .field("email", string().required().email())
///         .build(),
/// };
/// assert_eq!(document.fields.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    /// Name identifying this schema
    pub name: String,

    /// Semantic version of the schema (e.g., "1.0.0")
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable description of the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reject root-level keys not declared in `fields`
    #[serde(default = "default_true")]
    pub allow_schema_keys_only: bool,

    /// Root field definitions
    pub fields: Schema,
}

/// An ordered mapping of field name to [`SchemaNode`].
///
/// Fields are visited in declaration order during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Iterates over declared field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Looks up a field node by name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.node)
    }

    /// Returns true if `name` is a declared field.
    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<Field>> for Schema {
    fn from(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

impl FromIterator<Field> for Schema {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A single named field of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name (the key looked up on the candidate object)
    pub name: String,

    /// Contract for the field's value
    #[serde(flatten)]
    pub node: SchemaNode,
}

impl Field {
    pub fn new(name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        Self {
            name: name.into(),
            node: node.into(),
        }
    }
}

/// The contract describing one field's expected type and constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Whether the key must be present on the candidate object
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Declared type and its constraints
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl SchemaNode {
    /// Creates an optional node of the given kind.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            required: false,
            kind,
        }
    }

    /// Returns the declared type tag.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

impl From<FieldKind> for SchemaNode {
    fn from(kind: FieldKind) -> Self {
        Self::new(kind)
    }
}

/// Declared type of a field, with the constraints meaningful for that type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Text value
    String(StringConstraints),
    /// Anything that coerces to a number
    Number(NumberConstraints),
    /// Text that round-trips exactly under a date pattern
    Date(DateConstraints),
    /// IPv4 dotted-quad address
    Ip(IpConstraints),
    /// Nested key-value mapping
    Object(ObjectConstraints),
    /// Ordered sequence
    Array(ArrayConstraints),
    /// Exactly a boolean
    Boolean,
    /// Exactly null
    Null,
}

impl FieldKind {
    /// Returns the type tag as written in schema documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String(_) => "string",
            FieldKind::Number(_) => "number",
            FieldKind::Date(_) => "date",
            FieldKind::Ip(_) => "ip",
            FieldKind::Object(_) => "object",
            FieldKind::Array(_) => "array",
            FieldKind::Boolean => "boolean",
            FieldKind::Null => "null",
        }
    }
}

/// Constraints for `string` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringConstraints {
    /// Minimum length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Allowed values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Value must look like an email address
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_email: bool,

    /// Value must be ASCII letters and digits only
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub text_and_numbers: bool,
}

/// Constraints for `number` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberConstraints {
    /// Lower bound (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_num: Option<f64>,

    /// Upper bound (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_num: Option<f64>,

    /// `[min, max]` pair: min exclusive, max inclusive.
    ///
    /// Kept as a list so a malformed pair is reported as a configuration error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_range: Option<Vec<f64>>,

    /// Allowed values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<f64>>,
}

/// Constraints for `date` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateConstraints {
    /// strftime pattern the value must round-trip under
    #[serde(default = "default_date_format")]
    pub format: String,
}

impl Default for DateConstraints {
    fn default() -> Self {
        Self {
            format: default_date_format(),
        }
    }
}

/// Constraints for `ip` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpConstraints {
    /// Allowed addresses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Constraints for `object` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectConstraints {
    /// Schema for the nested mapping; when absent any mapping is accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_schema: Option<Schema>,

    /// Reject nested keys not declared in `object_schema`
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub allow_schema_keys_only: bool,
}

impl Default for ObjectConstraints {
    fn default() -> Self {
        Self {
            object_schema: None,
            allow_schema_keys_only: true,
        }
    }
}

/// Constraints for `array` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayConstraints {
    /// Contract every element must satisfy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_array_schema: Option<Box<SchemaNode>>,
}
