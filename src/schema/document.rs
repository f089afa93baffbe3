//! Normalized schema handed to the renderer as a JSON file.
//!
//! Each field is enriched with its mapped TypeScript and decorator types so
//! templates can use them directly. The file lives in the system temp
//! directory and is removed when the [`SchemaDocument`] is dropped.

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::model::{EntitySchema, Field, Functionality};
use crate::core::error::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedField<'a> {
    #[serde(flatten)]
    field: &'a Field,
    ts_type: &'static str,
    property_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedSchema<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
    is_add_test_case: bool,
    functionalities: &'a [Functionality],
    fields: Vec<RenderedField<'a>>,
}

impl<'a> From<&'a EntitySchema> for RenderedSchema<'a> {
    fn from(schema: &'a EntitySchema) -> Self {
        Self {
            name: &schema.name,
            parent: schema.parent.as_deref(),
            is_add_test_case: schema.is_add_test_case,
            functionalities: &schema.functionalities,
            fields: schema
                .fields
                .iter()
                .map(|field| RenderedField {
                    field,
                    ts_type: field.field_type.ts_type(),
                    property_type: field.field_type.decorator_type().into_owned(),
                })
                .collect(),
        }
    }
}

/// Render a schema to the JSON the templates read
pub fn to_json(schema: &EntitySchema) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(RenderedSchema::from(schema))?)
}

/// A normalized schema written to a temporary file
pub struct SchemaDocument {
    file: NamedTempFile,
}

impl SchemaDocument {
    pub fn write(schema: &EntitySchema) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("hexogen-schema-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer_pretty(&mut file, &RenderedSchema::from(schema))?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldType;

    fn user_schema() -> EntitySchema {
        let mut schema = EntitySchema::new("User");
        let mut age = Field::new("age", FieldType::Int);
        age.optional = Some(true);
        schema.fields = vec![
            Field::new("email", FieldType::Varchar),
            age,
            Field::new("shape", FieldType::Other("geometry".into())),
        ];
        schema
    }

    #[test]
    fn test_fields_carry_mapped_types() {
        let json = to_json(&user_schema()).unwrap();

        assert_eq!(json["name"], "User");
        assert_eq!(json["isAddTestCase"], true);
        assert_eq!(json["functionalities"][1], "findAll");
        assert!(json.get("parent").is_none());

        let fields = json["fields"].as_array().unwrap();
        assert_eq!(fields[0]["type"], "varchar");
        assert_eq!(fields[0]["tsType"], "string");
        assert_eq!(fields[0]["propertyType"], "String");
        assert_eq!(fields[1]["optional"], true);
        assert_eq!(fields[1]["tsType"], "number");
        assert_eq!(fields[2]["tsType"], "any");
        assert_eq!(fields[2]["propertyType"], "geometry");
    }

    #[test]
    fn test_dto_flag_keeps_its_key() {
        let draft = crate::schema::SchemaDraft::from_value(&serde_json::json!({
            "name": "User",
            "fields": [
                { "name": "email", "type": "varchar", "dto": true },
                { "name": "age", "type": "int", "includeInDTO": false }
            ]
        }))
        .unwrap();
        let mut schema = EntitySchema::new("User");
        schema.fields = draft.fields;

        let json = to_json(&schema).unwrap();
        assert_eq!(json["fields"][0]["dto"], true);
        assert_eq!(json["fields"][1]["dto"], false);
        assert!(json["fields"][0].get("includeInDTO").is_none());
    }

    #[test]
    fn test_document_written_and_removed() {
        let doc = SchemaDocument::write(&user_schema()).unwrap();
        let path = doc.path().to_path_buf();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["fields"].as_array().unwrap().len(), 3);
        assert!(path.extension().is_some_and(|e| e == "json"));

        drop(doc);
        assert!(!path.exists());
    }
}
