//! Builder pattern for creating schemas.
//!
//! This module provides fluent builders for schema documents, schemas and
//! individual field nodes. Builders only produce plain [`SchemaNode`] values;
//! the validator does not care how a node was constructed.

use crate::{
    ArrayConstraints, DateConstraints, Field, FieldKind, IpConstraints, NumberConstraints,
    ObjectConstraints, Schema, SchemaDocument, SchemaNode, StringConstraints,
};

/// Builder for creating a `SchemaDocument`.
///
/// # Example
///
/// ```rust
/// use shapecheck_core::{SchemaDocumentBuilder, boolean, email};
///
/// let document = SchemaDocumentBuilder::new("newsletter")
///     .version("2.0.0")
///     .description("Newsletter subscription payload")
///     .field("email", email().required())
///     .field("consent", boolean().required())
///     .build();
///
/// assert_eq!(document.fields.len(), 2);
/// assert!(document.allow_schema_keys_only);
/// ```
#[derive(Debug)]
pub struct SchemaDocumentBuilder {
    name: String,
    version: String,
    description: Option<String>,
    allow_schema_keys_only: bool,
    fields: Vec<Field>,
}

impl SchemaDocumentBuilder {
    /// Creates a new document builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            description: None,
            allow_schema_keys_only: true,
            fields: Vec::new(),
        }
    }

    /// Sets the schema version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the schema description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets closed-schema mode for the root object.
    pub fn allow_schema_keys_only(mut self, allow: bool) -> Self {
        self.allow_schema_keys_only = allow;
        self
    }

    /// Adds a root field.
    pub fn field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.fields.push(Field::new(name, node));
        self
    }

    /// Builds the document.
    pub fn build(self) -> SchemaDocument {
        SchemaDocument {
            name: self.name,
            version: self.version,
            description: self.description,
            allow_schema_keys_only: self.allow_schema_keys_only,
            fields: Schema::from(self.fields),
        }
    }
}

/// Builder for creating a `Schema`.
///
/// # Example
///
/// ```rust
/// use shapecheck_core::{SchemaBuilder, id, string};
///
/// let schema = SchemaBuilder::new()
///     .field("id", id().required())
///     .field("name", string().min_length(2))
///     .build();
///
/// assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["id", "name"]);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Creates an empty schema builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    pub fn field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.fields.push(Field::new(name, node));
        self
    }

    /// Builds the schema.
    pub fn build(self) -> Schema {
        Schema::from(self.fields)
    }
}

/// Builder for a `string` node.
#[derive(Debug, Default)]
pub struct StringFieldBuilder {
    required: bool,
    constraints: StringConstraints,
}

impl StringFieldBuilder {
    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the minimum length.
    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    /// Sets the maximum length.
    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.max_length = Some(max);
        self
    }

    /// Restricts the value to the given set.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Requires the value to be an email address.
    pub fn email(mut self) -> Self {
        self.constraints.is_email = true;
        self
    }

    /// Requires the value to be ASCII letters and digits only.
    pub fn text_and_numbers(mut self) -> Self {
        self.constraints.text_and_numbers = true;
        self
    }

    pub fn build(self) -> SchemaNode {
        SchemaNode {
            required: self.required,
            kind: FieldKind::String(self.constraints),
        }
    }
}

/// Builder for a `number` node.
#[derive(Debug, Default)]
pub struct NumberFieldBuilder {
    required: bool,
    constraints: NumberConstraints,
}

impl NumberFieldBuilder {
    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the inclusive lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min_num = Some(min);
        self
    }

    /// Sets the inclusive upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max_num = Some(max);
        self
    }

    /// Sets the range: `min` exclusive, `max` inclusive.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.constraints.num_range = Some(vec![min, max]);
        self
    }

    /// Restricts the value to the given set.
    pub fn options(mut self, options: impl IntoIterator<Item = f64>) -> Self {
        self.constraints.options = Some(options.into_iter().collect());
        self
    }

    pub fn build(self) -> SchemaNode {
        SchemaNode {
            required: self.required,
            kind: FieldKind::Number(self.constraints),
        }
    }
}

/// Builder for a `date` node.
#[derive(Debug, Default)]
pub struct DateFieldBuilder {
    required: bool,
    constraints: DateConstraints,
}

impl DateFieldBuilder {
    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the strftime pattern.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.constraints.format = format.into();
        self
    }

    pub fn build(self) -> SchemaNode {
        SchemaNode {
            required: self.required,
            kind: FieldKind::Date(self.constraints),
        }
    }
}

/// Builder for an `ip` node.
#[derive(Debug, Default)]
pub struct IpFieldBuilder {
    required: bool,
    constraints: IpConstraints,
}

impl IpFieldBuilder {
    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restricts the address to the given set.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> SchemaNode {
        SchemaNode {
            required: self.required,
            kind: FieldKind::Ip(self.constraints),
        }
    }
}

/// Builder for an `object` node.
#[derive(Debug, Default)]
pub struct ObjectFieldBuilder {
    required: bool,
    constraints: ObjectConstraints,
}

impl ObjectFieldBuilder {
    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the nested schema.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.constraints.object_schema = Some(schema);
        self
    }

    /// Sets closed-schema mode for the nested object.
    pub fn allow_schema_keys_only(mut self, allow: bool) -> Self {
        self.constraints.allow_schema_keys_only = allow;
        self
    }

    pub fn build(self) -> SchemaNode {
        SchemaNode {
            required: self.required,
            kind: FieldKind::Object(self.constraints),
        }
    }
}

/// Builder for an `array` node.
#[derive(Debug, Default)]
pub struct ArrayFieldBuilder {
    required: bool,
    constraints: ArrayConstraints,
}

impl ArrayFieldBuilder {
    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the contract every element must satisfy.
    pub fn items(mut self, node: impl Into<SchemaNode>) -> Self {
        self.constraints.valid_array_schema = Some(Box::new(node.into()));
        self
    }

    pub fn build(self) -> SchemaNode {
        SchemaNode {
            required: self.required,
            kind: FieldKind::Array(self.constraints),
        }
    }
}

/// Builder for the plain-type nodes (`boolean`, `null`).
#[derive(Debug)]
pub struct PlainFieldBuilder {
    required: bool,
    kind: FieldKind,
}

impl PlainFieldBuilder {
    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn build(self) -> SchemaNode {
        SchemaNode {
            required: self.required,
            kind: self.kind,
        }
    }
}

impl From<StringFieldBuilder> for SchemaNode {
    fn from(builder: StringFieldBuilder) -> Self {
        builder.build()
    }
}

impl From<NumberFieldBuilder> for SchemaNode {
    fn from(builder: NumberFieldBuilder) -> Self {
        builder.build()
    }
}

impl From<DateFieldBuilder> for SchemaNode {
    fn from(builder: DateFieldBuilder) -> Self {
        builder.build()
    }
}

impl From<IpFieldBuilder> for SchemaNode {
    fn from(builder: IpFieldBuilder) -> Self {
        builder.build()
    }
}

impl From<ObjectFieldBuilder> for SchemaNode {
    fn from(builder: ObjectFieldBuilder) -> Self {
        builder.build()
    }
}

impl From<ArrayFieldBuilder> for SchemaNode {
    fn from(builder: ArrayFieldBuilder) -> Self {
        builder.build()
    }
}

impl From<PlainFieldBuilder> for SchemaNode {
    fn from(builder: PlainFieldBuilder) -> Self {
        builder.build()
    }
}

/// Starts a `string` node.
pub fn string() -> StringFieldBuilder {
    StringFieldBuilder::default()
}

/// Starts a `number` node.
pub fn number() -> NumberFieldBuilder {
    NumberFieldBuilder::default()
}

/// Starts a `date` node with the default pattern (`%Y-%m-%d %H:%M:%S`).
pub fn date() -> DateFieldBuilder {
    DateFieldBuilder::default()
}

/// Starts an `ip` node.
pub fn ip() -> IpFieldBuilder {
    IpFieldBuilder::default()
}

/// Starts an `object` node. Without a schema any mapping is accepted.
pub fn object() -> ObjectFieldBuilder {
    ObjectFieldBuilder::default()
}

/// Starts an `array` node. Without an item schema any sequence is accepted.
pub fn array() -> ArrayFieldBuilder {
    ArrayFieldBuilder::default()
}

/// Starts a `boolean` node.
pub fn boolean() -> PlainFieldBuilder {
    PlainFieldBuilder {
        required: false,
        kind: FieldKind::Boolean,
    }
}

/// Starts a `null` node.
pub fn null() -> PlainFieldBuilder {
    PlainFieldBuilder {
        required: false,
        kind: FieldKind::Null,
    }
}

/// Numeric identifier: a number of at least 1.
pub fn id() -> NumberFieldBuilder {
    number().min(1.0)
}

/// Email address string.
pub fn email() -> StringFieldBuilder {
    string().email()
}

/// Username string: ASCII letters and digits only.
pub fn username() -> StringFieldBuilder {
    string().text_and_numbers()
}
