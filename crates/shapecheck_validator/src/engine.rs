//! Main validation engine.
//!
//! This module provides the [`ObjectValidator`] that walks a schema and a
//! candidate object in lockstep, dispatches each present key to its field
//! validator, recurses into nested objects and arrays, and aggregates every
//! violation into one report.

use crate::fields::{self, PlainType};
use crate::{ValidationError, ValidationFailure, ValidationResult, Violation};
use shapecheck_core::{
    ArrayConstraints, ConfigurationError, DataMap, DataValue, FieldKind, ObjectConstraints,
    Schema, SchemaDocument, SchemaNode, ValidationContext,
};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Key reported when the candidate itself is not an object.
pub const ROOT_KEY: &str = "$root";

/// Recursive validation engine for schemas.
///
/// Every schema key is always visited and no check short-circuits another,
/// so a failure lists everything wrong with the object at once.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use shapecheck_core::{DataValue, SchemaBuilder, email, id};
/// use shapecheck_validator::ObjectValidator;
///
/// let schema = SchemaBuilder::new()
///     .field("id", id().required())
///     .field("email", email().required())
///     .build();
///
/// let object = DataValue::from(json!({ "id": 4, "email": "bad" }));
/// let validator = ObjectValidator::new();
///
/// match validator.validate(&object, &schema) {
///     Ok(()) => println!("Validation passed!"),
///     Err(err) => {
///         for violation in err.violations() {
///             println!("Error: {}", violation);
///         }
///     }
/// }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectValidator;

impl ObjectValidator {
    /// Creates a new object validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates an object against a schema in closed-schema mode.
    pub fn validate(&self, object: &DataValue, schema: &Schema) -> ValidationResult {
        self.validate_with_context(object, schema, &ValidationContext::default())
    }

    /// Validates an object against a schema with explicit options.
    ///
    /// # Errors
    ///
    /// * [`ValidationError::Configuration`] if the schema is malformed
    /// * [`ValidationError::Failed`] with every violation and the schema used,
    ///   if the object does not conform
    pub fn validate_with_context(
        &self,
        object: &DataValue,
        schema: &Schema,
        context: &ValidationContext,
    ) -> ValidationResult {
        let violations = self.violations(object, schema, context)?;

        if violations.is_empty() {
            debug!("Object conforms to schema");
            return Ok(());
        }

        debug!(violations = violations.len(), "Object failed validation");
        Err(ValidationError::Failed(ValidationFailure {
            violations,
            schema: schema.clone(),
        }))
    }

    /// Validates an object against a schema document, honouring its root
    /// closed-schema setting.
    pub fn validate_document(&self, object: &DataValue, document: &SchemaDocument) -> ValidationResult {
        let context =
            ValidationContext::new().with_allow_schema_keys_only(document.allow_schema_keys_only);
        self.validate_with_context(object, &document.fields, &context)
    }

    /// Collects violations without turning them into an error.
    ///
    /// An empty list means the object conforms. A candidate that is not an
    /// object yields a single type mismatch reported against [`ROOT_KEY`].
    pub fn violations(
        &self,
        object: &DataValue,
        schema: &Schema,
        context: &ValidationContext,
    ) -> Result<Vec<Violation>, ConfigurationError> {
        if schema.is_empty() {
            return Err(ConfigurationError::EmptySchema);
        }

        debug!(
            fields = schema.len(),
            closed = context.allow_schema_keys_only,
            "Validating object against schema"
        );

        match object.as_map() {
            Some(map) => validate_map(map, schema, context.allow_schema_keys_only),
            None => Ok(vec![Violation::type_mismatch(
                ROOT_KEY,
                "object",
                object.type_name(),
            )]),
        }
    }
}

/// Validates one mapping against one schema.
fn validate_map(
    map: &DataMap,
    schema: &Schema,
    allow_schema_keys_only: bool,
) -> Result<Vec<Violation>, ConfigurationError> {
    if schema.is_empty() {
        return Err(ConfigurationError::EmptySchema);
    }

    let mut seen = HashSet::new();
    if let Some(name) = schema.keys().find(|k| !seen.insert(*k)) {
        return Err(ConfigurationError::DuplicateField(name.to_string()));
    }

    let mut violations = Vec::new();

    for field in schema.fields() {
        match map.get(&field.name) {
            // Absence is judged on required-ness alone.
            None => {
                if field.node.required {
                    trace!(key = %field.name, "Required key missing");
                    violations.push(Violation::missing_required(&field.name));
                }
            }
            Some(value) => {
                trace!(key = %field.name, kind = field.node.type_name(), "Checking key");
                violations.extend(validate_field(&field.name, value, &field.node)?);
            }
        }
    }

    if allow_schema_keys_only {
        let unexpected: Vec<&String> = map.keys().filter(|k| !schema.contains_key(k)).collect();
        if !unexpected.is_empty() {
            let allowed_keys: Vec<String> = schema.keys().map(String::from).collect();
            for key in unexpected {
                violations.push(Violation::UnexpectedKey {
                    key: key.clone(),
                    allowed_keys: allowed_keys.clone(),
                });
            }
        }
    }

    Ok(violations)
}

/// Validates a single present value against its node.
///
/// This is the dispatch point: each [`FieldKind`] maps to exactly one field
/// validator.
pub fn validate_field(
    field: &str,
    value: &DataValue,
    node: &SchemaNode,
) -> Result<Vec<Violation>, ConfigurationError> {
    match &node.kind {
        FieldKind::String(c) => Ok(fields::validate_string(field, value, c)),
        FieldKind::Number(c) => fields::validate_number(field, value, c),
        FieldKind::Date(c) => fields::validate_date(field, value, c),
        FieldKind::Ip(c) => Ok(fields::validate_ip(field, value, c)),
        FieldKind::Object(c) => validate_object(field, value, c),
        FieldKind::Array(c) => validate_array(field, value, c),
        FieldKind::Boolean => Ok(fields::validate_plain(field, value, PlainType::Boolean)),
        FieldKind::Null => Ok(fields::validate_plain(field, value, PlainType::Null)),
    }
}

/// Validates an `object` field and relabels the nested report onto `field`.
fn validate_object(
    field: &str,
    value: &DataValue,
    c: &ObjectConstraints,
) -> Result<Vec<Violation>, ConfigurationError> {
    let Some(map) = value.as_map() else {
        return Ok(vec![Violation::type_mismatch(
            field,
            "object",
            value.type_name(),
        )]);
    };

    let nested = nested_violations(field, map, c)?;
    Ok(nested.into_iter().map(|v| v.relabel(field)).collect())
}

fn nested_violations(
    field: &str,
    map: &DataMap,
    c: &ObjectConstraints,
) -> Result<Vec<Violation>, ConfigurationError> {
    let Some(schema) = &c.object_schema else {
        return Ok(Vec::new());
    };

    if schema.is_empty() {
        return Err(ConfigurationError::EmptyObjectSchema {
            field: field.to_string(),
        });
    }

    trace!(key = field, fields = schema.len(), "Descending into nested object");
    validate_map(map, schema, c.allow_schema_keys_only)
}

/// Validates an `array` field, one bundled violation per failing element.
fn validate_array(
    field: &str,
    value: &DataValue,
    c: &ArrayConstraints,
) -> Result<Vec<Violation>, ConfigurationError> {
    let Some(items) = value.as_list() else {
        return Ok(vec![Violation::type_mismatch(
            field,
            "array",
            value.type_name(),
        )]);
    };

    let Some(item_node) = c.valid_array_schema.as_deref() else {
        return Ok(Vec::new());
    };

    let mut violations = Vec::new();

    for (index, element) in items.iter().enumerate() {
        let key = index.to_string();
        let element_violations = match &item_node.kind {
            // Object elements are judged as whole objects; the sub-report is
            // bundled as-is rather than relabelled.
            FieldKind::Object(oc) => match element.as_map() {
                Some(map) => nested_violations(field, map, oc)?,
                None => vec![Violation::type_mismatch(
                    &key,
                    "object",
                    element.type_name(),
                )],
            },
            // Scalars are judged under the one-key schema `{ index: item_node }`.
            _ => validate_field(&key, element, item_node)?,
        };

        if !element_violations.is_empty() {
            trace!(key = field, index, "Array element failed");
            violations.push(Violation::InvalidArrayElement {
                field: field.to_string(),
                index,
                violations: element_violations,
            });
        }
    }

    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shapecheck_core::{SchemaBuilder, array, boolean, date, ip, number, object, string};

    fn value(json: serde_json::Value) -> DataValue {
        DataValue::from(json)
    }

    #[test]
    fn test_valid_object() {
        let schema = SchemaBuilder::new()
            .field("name", string().required().min_length(2))
            .field("age", number().min(0.0))
            .field("active", boolean())
            .build();

        let result = ObjectValidator::new().validate(
            &value(json!({"name": "Ada", "age": 36, "active": true})),
            &schema,
        );
        assert!(result.is_ok(), "unexpected failure: {:?}", result);
    }

    #[test]
    fn test_empty_schema_is_configuration_error() {
        let result = ObjectValidator::new().validate(&value(json!({"a": 1})), &Schema::new());
        assert!(matches!(
            result,
            Err(ValidationError::Configuration(ConfigurationError::EmptySchema))
        ));
    }

    #[test]
    fn test_required_missing() {
        let schema = SchemaBuilder::new()
            .field("name", string().required())
            .field("nickname", string())
            .build();

        let violations = ObjectValidator::new()
            .violations(&value(json!({})), &schema, &ValidationContext::new())
            .unwrap();
        assert_eq!(violations, vec![Violation::missing_required("name")]);
    }

    #[test]
    fn test_absent_optional_skips_type_checks() {
        let schema = SchemaBuilder::new()
            .field("when", date())
            .field("addr", ip())
            .field("count", number().range(1.0, 2.0))
            .build();

        let violations = ObjectValidator::new()
            .violations(&value(json!({})), &schema, &ValidationContext::new())
            .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_present_null_is_checked() {
        let schema = SchemaBuilder::new()
            .field("name", string().required())
            .build();

        let violations = ObjectValidator::new()
            .violations(&value(json!({"name": null})), &schema, &ValidationContext::new())
            .unwrap();
        assert_eq!(
            violations,
            vec![Violation::type_mismatch("name", "string", "null")]
        );
    }

    #[test]
    fn test_unexpected_keys_follow_schema_violations() {
        let schema = SchemaBuilder::new()
            .field("a", string().required())
            .build();

        let violations = ObjectValidator::new()
            .violations(&value(json!({"b": 1, "c": 2})), &schema, &ValidationContext::new())
            .unwrap();

        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0], Violation::missing_required("a"));
        assert_eq!(violations[1].field(), "b");
        assert_eq!(violations[2].field(), "c");
    }

    #[test]
    fn test_open_mode_ignores_extra_keys() {
        let schema = SchemaBuilder::new().field("a", string()).build();
        let context = ValidationContext::new().with_allow_schema_keys_only(false);

        let result = ObjectValidator::new().validate_with_context(
            &value(json!({"a": "x", "b": 1})),
            &schema,
            &context,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_non_object_root() {
        let schema = SchemaBuilder::new().field("a", string()).build();
        let violations = ObjectValidator::new()
            .violations(&value(json!([1, 2])), &schema, &ValidationContext::new())
            .unwrap();
        assert_eq!(
            violations,
            vec![Violation::type_mismatch(ROOT_KEY, "object", "array")]
        );
    }

    #[test]
    fn test_object_type_mismatch() {
        let schema = SchemaBuilder::new().field("addr", object()).build();
        let violations = ObjectValidator::new()
            .violations(&value(json!({"addr": [1]})), &schema, &ValidationContext::new())
            .unwrap();
        assert_eq!(
            violations,
            vec![Violation::type_mismatch("addr", "object", "array")]
        );
    }

    #[test]
    fn test_object_without_schema_accepts_any_mapping() {
        let schema = SchemaBuilder::new().field("meta", object()).build();
        let result = ObjectValidator::new()
            .validate(&value(json!({"meta": {"anything": [1, 2, 3]}})), &schema);
        assert!(result.is_ok());
    }

    #[test]
    fn test_nested_relabelling() {
        let schema = SchemaBuilder::new()
            .field(
                "addr",
                object().schema(
                    SchemaBuilder::new()
                        .field("city", string().required())
                        .field("zip", number())
                        .build(),
                ),
            )
            .build();

        let violations = ObjectValidator::new()
            .violations(
                &value(json!({"addr": {"zip": "abc", "street": "Main"}})),
                &schema,
                &ValidationContext::new(),
            )
            .unwrap();

        assert_eq!(
            violations,
            vec![
                Violation::RequiredProperty {
                    field: "addr".into(),
                    property: "city".into(),
                },
                Violation::type_mismatch("zip", "number", "string"),
                Violation::KeyNotInSchema {
                    field: "addr".into(),
                    key: "street".into(),
                    allowed_keys: vec!["city".into(), "zip".into()],
                },
            ]
        );
    }

    #[test]
    fn test_nested_open_object() {
        let schema = SchemaBuilder::new()
            .field(
                "addr",
                object()
                    .schema(SchemaBuilder::new().field("city", string()).build())
                    .allow_schema_keys_only(false),
            )
            .build();

        let result = ObjectValidator::new()
            .validate(&value(json!({"addr": {"city": "Rome", "zip": 1}})), &schema);
        assert!(result.is_ok());
    }

    #[test]
    fn test_relabelling_at_every_level() {
        let inner = SchemaBuilder::new()
            .field("code", string().required())
            .build();
        let middle = SchemaBuilder::new()
            .field("country", object().required().schema(inner))
            .build();
        let schema = SchemaBuilder::new()
            .field("addr", object().schema(middle))
            .build();

        let violations = ObjectValidator::new()
            .violations(
                &value(json!({"addr": {"country": {}, "extra": true}})),
                &schema,
                &ValidationContext::new(),
            )
            .unwrap();

        assert_eq!(
            violations,
            vec![
                Violation::RequiredProperty {
                    field: "country".into(),
                    property: "code".into(),
                },
                Violation::KeyNotInSchema {
                    field: "addr".into(),
                    key: "extra".into(),
                    allowed_keys: vec!["country".into()],
                },
            ]
        );
    }

    #[test]
    fn test_nested_empty_schema() {
        let schema = SchemaBuilder::new()
            .field("addr", object().schema(Schema::new()))
            .build();

        let result = ObjectValidator::new().validate(&value(json!({"addr": {}})), &schema);
        assert!(matches!(
            result,
            Err(ValidationError::Configuration(
                ConfigurationError::EmptyObjectSchema { .. }
            ))
        ));
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let schema = SchemaBuilder::new()
            .field("a", string().required())
            .field("a", string().required())
            .build();

        let result = ObjectValidator::new().validate(&value(json!({"b": 1})), &schema);
        assert!(matches!(
            result,
            Err(ValidationError::Configuration(ConfigurationError::DuplicateField(ref k))) if k == "a"
        ));
    }

    #[test]
    fn test_nested_duplicate_keys_are_rejected() {
        let inner = SchemaBuilder::new()
            .field("city", string())
            .field("city", string())
            .build();
        let schema = SchemaBuilder::new()
            .field("addr", object().schema(inner))
            .build();

        let result = ObjectValidator::new().validate(&value(json!({"addr": {}})), &schema);
        assert!(matches!(
            result,
            Err(ValidationError::Configuration(ConfigurationError::DuplicateField(ref k))) if k == "city"
        ));
    }

    #[test]
    fn test_array_type_mismatch() {
        let schema = SchemaBuilder::new().field("tags", array()).build();
        let violations = ObjectValidator::new()
            .violations(&value(json!({"tags": "a,b"})), &schema, &ValidationContext::new())
            .unwrap();
        assert_eq!(
            violations,
            vec![Violation::type_mismatch("tags", "array", "string")]
        );
    }

    #[test]
    fn test_array_scalar_elements() {
        let schema = SchemaBuilder::new()
            .field("scores", array().items(number().max(10.0)))
            .build();

        let violations = ObjectValidator::new()
            .violations(
                &value(json!({"scores": [1, 20, "x", 3]})),
                &schema,
                &ValidationContext::new(),
            )
            .unwrap();

        assert_eq!(
            violations,
            vec![
                Violation::InvalidArrayElement {
                    field: "scores".into(),
                    index: 1,
                    violations: vec![Violation::AboveMaximum {
                        field: "1".into(),
                        max: 10.0,
                        actual: 20.0,
                    }],
                },
                Violation::InvalidArrayElement {
                    field: "scores".into(),
                    index: 2,
                    violations: vec![Violation::type_mismatch("2", "number", "string")],
                },
            ]
        );
    }

    #[test]
    fn test_array_object_elements() {
        let schema = SchemaBuilder::new()
            .field(
                "items",
                array().items(
                    object().schema(
                        SchemaBuilder::new()
                            .field("id", number().required())
                            .field("name", string().required())
                            .build(),
                    ),
                ),
            )
            .build();

        let violations = ObjectValidator::new()
            .violations(
                &value(json!({"items": [
                    {"id": 1, "name": "ok"},
                    {"id": 2},
                    "not an object",
                    {"id": 3, "name": "x", "extra": 1}
                ]})),
                &schema,
                &ValidationContext::new(),
            )
            .unwrap();

        assert_eq!(violations.len(), 3);
        assert_eq!(
            violations[0],
            Violation::InvalidArrayElement {
                field: "items".into(),
                index: 1,
                violations: vec![Violation::missing_required("name")],
            }
        );
        assert_eq!(
            violations[1],
            Violation::InvalidArrayElement {
                field: "items".into(),
                index: 2,
                violations: vec![Violation::type_mismatch("2", "object", "string")],
            }
        );
        assert!(matches!(
            &violations[2],
            Violation::InvalidArrayElement { index: 3, violations, .. }
                if matches!(violations[..], [Violation::UnexpectedKey { .. }])
        ));
    }

    #[test]
    fn test_empty_array_is_valid() {
        let schema = SchemaBuilder::new()
            .field("tags", array().required().items(string().min_length(3)))
            .build();
        let result = ObjectValidator::new().validate(&value(json!({"tags": []})), &schema);
        assert!(result.is_ok());
    }

    #[test]
    fn test_configuration_error_not_collected() {
        let schema = SchemaBuilder::new()
            .field("name", string().required())
            .field(
                "age",
                SchemaNode::new(FieldKind::Number(shapecheck_core::NumberConstraints {
                    num_range: Some(vec![1.0]),
                    ..Default::default()
                })),
            )
            .build();

        let result = ObjectValidator::new().validate(&value(json!({"age": 3})), &schema);
        assert!(matches!(
            result,
            Err(ValidationError::Configuration(
                ConfigurationError::InvalidNumRange { len: 1, .. }
            ))
        ));
    }

    #[test]
    fn test_failure_carries_schema() {
        let schema = SchemaBuilder::new().field("a", boolean().required()).build();
        let err = ObjectValidator::new()
            .validate(&value(json!({})), &schema)
            .unwrap_err();

        let failure = err.failure().expect("validation failure");
        assert_eq!(failure.schema, schema);
        assert_eq!(failure.violations.len(), 1);
        assert_eq!(err.to_string(), "Validation failed with 1 violation(s)");
    }

    #[test]
    fn test_validate_document_uses_document_mode() {
        let document = shapecheck_core::SchemaDocumentBuilder::new("open")
            .allow_schema_keys_only(false)
            .field("a", string())
            .build();

        let result =
            ObjectValidator::new().validate_document(&value(json!({"a": "x", "b": 2})), &document);
        assert!(result.is_ok());
    }
}
