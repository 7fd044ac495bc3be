//! # JSON Schema Export
//!
//! Renders a [`Schema`] as a JSON Schema (draft 2020-12) document so that
//! API documentation and contract tests can consume the same rules the
//! forms enforce.
//!
//! The export is a projection, not an equivalent. Content-safety and
//! predicate checks have no JSON Schema keyword; they appear in the
//! property `description`. Cross-field rules are listed in the schema's
//! top-level `description`. Unknown keys are stripped at validation time,
//! so the export allows them (`additionalProperties: true`).

use serde_json::{json, Map, Value};

use crate::field::{Check, Field, FieldKind};
use crate::schema::Schema;

const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Render `schema` as a JSON Schema document.
pub fn to_json_schema(schema: &Schema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in schema.fields() {
        properties.insert(field.name().to_string(), property(field));
        if field.is_required() && field.default_value().is_none() {
            required.push(Value::String(field.name().to_string()));
        }
    }

    let mut doc = json!({
        "$schema": DRAFT_2020_12,
        "title": schema.name(),
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": true,
    });

    if !schema.rules().is_empty() {
        let rules: Vec<&str> = schema.rules().iter().map(|r| r.description()).collect();
        doc["description"] = Value::String(format!("Rules: {}", rules.join("; ")));
    }

    doc
}

fn property(field: &Field) -> Value {
    let mut prop = Map::new();
    let mut notes = vec![field.label().to_string()];

    match field.kind() {
        FieldKind::Text => {
            prop.insert("type".into(), json!("string"));
        }
        FieldKind::Integer => {
            prop.insert("type".into(), json!("integer"));
        }
        FieldKind::CoercedInteger => {
            prop.insert("type".into(), json!(["integer", "string"]));
            prop.insert("pattern".into(), json!(r"^\s*[+-]?\d+\s*$"));
        }
        FieldKind::Boolean => {
            prop.insert("type".into(), json!("boolean"));
        }
        FieldKind::Email => {
            prop.insert("type".into(), json!("string"));
            prop.insert("format".into(), json!("email"));
        }
        FieldKind::Uuid => {
            prop.insert("type".into(), json!("string"));
            prop.insert("format".into(), json!("uuid"));
        }
        FieldKind::Date => {
            prop.insert("type".into(), json!("string"));
            prop.insert("format".into(), json!("date"));
        }
        FieldKind::Url => {
            prop.insert("type".into(), json!("string"));
            prop.insert("format".into(), json!("uri"));
        }
        FieldKind::OneOf(allowed) => {
            prop.insert("type".into(), json!("string"));
            prop.insert("enum".into(), json!(allowed));
        }
    }

    for check in field.checks() {
        match check {
            Check::MinLength { min, .. } => {
                prop.insert("minLength".into(), json!(min));
            }
            Check::MaxLength { max, .. } => {
                prop.insert("maxLength".into(), json!(max));
            }
            Check::Range { min, max, .. } => {
                if let Some(min) = min {
                    prop.insert("minimum".into(), json!(min));
                }
                if let Some(max) = max {
                    prop.insert("maximum".into(), json!(max));
                }
            }
            Check::SafeContent { .. } => notes.push("no script markup".to_string()),
            Check::Predicate { message, .. } => notes.push(message.clone()),
        }
    }

    if let Some(default) = field.default_value() {
        prop.insert("default".into(), default.clone());
    }
    prop.insert("description".into(), Value::String(notes.join(". ")));

    Value::Object(prop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, names};
    use crate::rule::CrossFieldRule;

    #[test]
    fn pagination_exports_defaults_and_bounds() {
        let doc = to_json_schema(catalog().get(names::PAGINATION).unwrap());
        assert_eq!(doc["title"], "pagination");
        assert_eq!(doc["properties"]["page"]["default"], 1);
        assert_eq!(doc["properties"]["page"]["minimum"], 1);
        assert_eq!(doc["properties"]["limit"]["maximum"], 100);
        assert_eq!(doc["properties"]["search"]["maxLength"], 100);
        assert_eq!(doc["required"], json!([]));
        assert_eq!(doc["additionalProperties"], true);
    }

    #[test]
    fn required_lists_fields_without_defaults() {
        let doc = to_json_schema(catalog().get(names::CREATE_ARTICLE).unwrap());
        assert_eq!(doc["required"], json!(["title", "content", "category"]));
        assert_eq!(doc["properties"]["thumbnail"]["format"], "uri");
        assert_eq!(doc["properties"]["content"]["minLength"], 50);
        assert!(doc["properties"]["category"]["enum"]
            .as_array()
            .unwrap()
            .contains(&json!("self_care")));
    }

    #[test]
    fn partial_schema_requires_nothing() {
        let doc = to_json_schema(catalog().get(names::UPDATE_ARTICLE).unwrap());
        assert_eq!(doc["required"], json!([]));
    }

    #[test]
    fn rules_are_described() {
        let doc = to_json_schema(catalog().get(names::REGISTER).unwrap());
        let description = doc["description"].as_str().unwrap();
        assert!(description.contains("password_confirmation must equal password"));
    }

    #[test]
    fn schema_without_rules_has_no_description() {
        let doc = to_json_schema(catalog().get(names::UUID_PARAM).unwrap());
        assert!(doc.get("description").is_none());
    }

    #[test]
    fn custom_rule_description_is_exported() {
        let schema = Schema::new("window")
            .field(Field::integer("from", "Dari"))
            .field(Field::integer("to", "Sampai"))
            .rule(CrossFieldRule::new(
                "to",
                &["from", "to"],
                "Rentang tidak valid",
                "to must not precede from",
                |data| data["from"].as_i64() <= data["to"].as_i64(),
            ));
        let doc = to_json_schema(&schema);
        assert_eq!(doc["description"], "Rules: to must not precede from");
    }

    #[test]
    fn every_export_compiles_and_agrees_on_empty_input() {
        for schema in catalog().iter() {
            let doc = to_json_schema(schema);
            let compiled = jsonschema::validator_for(&doc)
                .unwrap_or_else(|e| panic!("{} does not compile: {e}", schema.name()));
            let empty = json!({});
            assert_eq!(
                compiled.is_valid(&empty),
                schema.validate(&empty).is_success(),
                "{} disagrees on {{}}",
                schema.name()
            );
        }
    }

    #[test]
    fn export_agrees_on_mood_bounds() {
        let schema = catalog().get(names::RECORD_MOOD).unwrap();
        let compiled = jsonschema::validator_for(&to_json_schema(schema)).unwrap();
        for level in [0, 1, 3, 5, 6] {
            let input = json!({ "mood_level": level });
            assert_eq!(
                compiled.is_valid(&input),
                schema.validate(&input).is_success(),
                "mood_level {level}"
            );
        }
    }
}
