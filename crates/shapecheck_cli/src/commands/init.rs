use anyhow::{Context, Result, anyhow};
use shapecheck_core::{
    DataMap, DataValue, DateConstraints, FieldKind, IpConstraints, Schema, SchemaDocument,
    SchemaDocumentBuilder, SchemaNode, StringConstraints, array, boolean, null, number, object,
};
use shapecheck_parser::{parse_data_file, to_yaml};
use shapecheck_validator::fields;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::output;

pub async fn execute(data_path: &Path, output_path: Option<&Path>, name: Option<String>) -> Result<()> {
    info!("Inferring schema from sample: {}", data_path.display());

    let sample = parse_data_file(data_path)
        .with_context(|| format!("Failed to parse data file: {}", data_path.display()))?;

    let name = name
        .or_else(|| {
            data_path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from)
        })
        .unwrap_or_else(|| "schema".to_string());

    let document = infer_document(&name, &sample)?;
    info!("Inferred {} root field(s)", document.fields.len());

    let yaml = to_yaml(&document).context("Failed to serialize schema to YAML")?;

    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write to file: {}", path.display()))?;
        output::print_success(&format!("Schema written to: {}", path.display()));
    } else {
        println!("{}", yaml);
    }

    Ok(())
}

/// Builds a closed schema document where every observed key is required.
fn infer_document(name: &str, sample: &DataValue) -> Result<SchemaDocument> {
    let map = sample
        .as_map()
        .ok_or_else(|| anyhow!("Sample document must be an object, got {}", sample.type_name()))?;

    if map.is_empty() {
        return Err(anyhow!("Sample document has no keys to infer a schema from"));
    }

    let mut builder = SchemaDocumentBuilder::new(name)
        .description(format!("Inferred from sample document '{}'", name));
    for (key, value) in map {
        let mut node = infer_node(value);
        node.required = true;
        builder = builder.field(key.as_str(), node);
    }

    Ok(builder.build())
}

fn infer_schema(map: &DataMap) -> Schema {
    map.iter()
        .map(|(key, value)| {
            let mut node = infer_node(value);
            node.required = true;
            shapecheck_core::Field::new(key.as_str(), node)
        })
        .collect()
}

fn infer_node(value: &DataValue) -> SchemaNode {
    match value {
        DataValue::Null => null().build(),
        DataValue::Bool(_) => boolean().build(),
        DataValue::Int(_) | DataValue::Float(_) => number().build(),
        DataValue::String(_) => SchemaNode::new(infer_string_kind(value)),
        // An empty mapping gives nothing to infer; leave it unconstrained.
        DataValue::Map(map) if map.is_empty() => object().build(),
        DataValue::Map(map) => object().schema(infer_schema(map)).build(),
        DataValue::List(items) => match items.first() {
            Some(first) => array().items(infer_node(first)).build(),
            None => array().build(),
        },
    }
}

/// Recognises dates in the default pattern, IPv4 addresses and emails.
fn infer_string_kind(value: &DataValue) -> FieldKind {
    let date = DateConstraints::default();
    if matches!(fields::validate_date("", value, &date), Ok(v) if v.is_empty()) {
        return FieldKind::Date(date);
    }

    let ip = IpConstraints::default();
    if fields::validate_ip("", value, &ip).is_empty() {
        return FieldKind::Ip(ip);
    }

    let email = StringConstraints {
        is_email: true,
        ..Default::default()
    };
    if fields::validate_string("", value, &email).is_empty() {
        return FieldKind::String(email);
    }

    FieldKind::String(StringConstraints::default())
}
