//! Turns a schema file or an interactive session into an [`EntitySchema`].
//!
//! File parsing is forgiving: keys of the wrong JSON type are
//! treated as absent and unknown keys are ignored. Only the things templates
//! cannot work without are rejected (a non-object document, a field without a
//! name).

use console::style;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::model::{EntitySchema, Field, Functionality};
use super::prompt::Prompter;
use crate::core::error::{Error, Result};
use crate::core::types::FieldType;
use crate::templates::GeneratorKind;

/// Resolve a user-supplied schema path against the project directory
pub fn resolve_schema_path(project_dir: &Path, raw: &Path) -> PathBuf {
    if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        project_dir.join(raw)
    }
}

/// Check that a schema file exists and parses as JSON, without interpreting it
pub fn validate_schema_file(project_dir: &Path, raw: &Path) -> Result<PathBuf> {
    let path = resolve_schema_path(project_dir, raw);
    read_json(&path)?;
    println!(
        "{}",
        style(format!("✅ Loaded schema from {}", raw.display())).green()
    );
    Ok(path)
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::SchemaNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&raw).map_err(|source| Error::MalformedJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Schema as read from a file, before missing identifiers are filled in
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDraft {
    pub name: Option<String>,
    pub parent: Option<String>,
    pub is_add_test_case: bool,
    pub functionalities: Vec<Functionality>,
    pub fields: Vec<Field>,
}

impl SchemaDraft {
    /// Parse a JSON document into a draft
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::invalid_schema("top-level value must be a JSON object"))?;

        let fields = match object.get("fields").and_then(Value::as_array) {
            Some(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| field_from_value(index, item))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let functionalities = match object.get("functionalities").and_then(Value::as_array) {
            Some(tags) => Functionality::canonicalize(
                tags.iter()
                    .filter_map(Value::as_str)
                    .filter_map(|tag| match tag.parse() {
                        Ok(f) => Some(f),
                        Err(e) => {
                            warn!(tag, "{e}, ignoring");
                            None
                        }
                    })
                    .collect(),
            ),
            None => Functionality::ALL.to_vec(),
        };

        Ok(Self {
            name: non_blank(object, "name"),
            parent: non_blank(object, "parent"),
            is_add_test_case: object
                .get("isAddTestCase")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            functionalities,
            fields,
        })
    }

    /// Read and parse a schema file
    pub fn load(path: &Path) -> Result<Self> {
        let value = read_json(path)?;
        let draft = Self::from_value(&value)?;
        debug!(
            path = %path.display(),
            fields = draft.fields.len(),
            "Parsed schema file"
        );
        Ok(draft)
    }
}

fn non_blank(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn field_from_value(index: usize, value: &Value) -> Result<Field> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::invalid_schema(format!("field #{index} must be a JSON object")))?;
    let name = non_blank(object, "name")
        .ok_or_else(|| Error::invalid_schema(format!("field #{index} has no name")))?;
    let tag = object
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Field {
        name,
        field_type: FieldType::from(tag),
        optional: object.get("optional").and_then(Value::as_bool),
        custom_type: object
            .get("customType")
            .and_then(Value::as_str)
            .map(str::to_string),
        example: object.get("example").cloned(),
        include_in_dto: object
            .get("dto")
            .or_else(|| object.get("includeInDTO"))
            .and_then(Value::as_bool),
    })
}

/// Builds entity schemas from files or prompts
pub struct SchemaNormalizer<'a> {
    project_dir: &'a Path,
    prompter: &'a dyn Prompter,
}

impl<'a> SchemaNormalizer<'a> {
    pub fn new(project_dir: &'a Path, prompter: &'a dyn Prompter) -> Self {
        Self {
            project_dir,
            prompter,
        }
    }

    /// Produce the schema for one generation.
    ///
    /// A name given on the command line wins over the file's `name`. Any
    /// identifier the generator requires and neither source provides is asked
    /// for interactively.
    pub fn normalize(
        &self,
        kind: GeneratorKind,
        cli_name: Option<&str>,
        schema_path: Option<&Path>,
    ) -> Result<EntitySchema> {
        let cli_name = cli_name.map(str::trim).filter(|n| !n.is_empty());
        match schema_path {
            Some(raw) => {
                let path = resolve_schema_path(self.project_dir, raw);
                let draft = SchemaDraft::load(&path)?;
                println!(
                    "\n📦 Using entity definition from file: {}",
                    raw.display()
                );
                self.complete(kind, cli_name, draft)
            }
            None => {
                println!(
                    "{}",
                    style("ℹ️  No entity definition file given, switching to interactive mode...")
                        .cyan()
                );
                self.interactive(kind, cli_name)
            }
        }
    }

    fn complete(
        &self,
        kind: GeneratorKind,
        cli_name: Option<&str>,
        draft: SchemaDraft,
    ) -> Result<EntitySchema> {
        let parent = match (kind, draft.parent) {
            (GeneratorKind::SubEntity, None) => Some(self.ask_parent()?),
            (_, parent) => parent,
        };
        let name = match cli_name.map(str::to_string).or(draft.name) {
            Some(name) => name,
            None => self.ask_name(kind)?,
        };

        Ok(EntitySchema {
            name,
            parent,
            is_add_test_case: draft.is_add_test_case,
            functionalities: draft.functionalities,
            fields: draft.fields,
        })
    }

    fn interactive(&self, kind: GeneratorKind, cli_name: Option<&str>) -> Result<EntitySchema> {
        let parent = match kind {
            GeneratorKind::SubEntity => Some(self.ask_parent()?),
            _ => None,
        };
        let name = match cli_name {
            Some(name) => name.to_string(),
            None => self.ask_name(kind)?,
        };

        let mut schema = EntitySchema::new(name);
        schema.parent = parent;

        if kind == GeneratorKind::Resource {
            schema.is_add_test_case = self
                .prompter
                .confirm("Do you want to add test cases and mock data?", true)?;

            let labels: Vec<&str> = Functionality::ALL.iter().map(|f| f.as_str()).collect();
            let chosen = self.prompter.multi_select(
                "Select the functionalities you want to include:",
                &labels,
                &[true; 5],
            )?;
            schema.functionalities = Functionality::canonicalize(
                chosen
                    .into_iter()
                    .filter_map(|i| Functionality::ALL.get(i).copied())
                    .collect(),
            );
        }

        Ok(schema)
    }

    fn ask_parent(&self) -> Result<String> {
        self.require("Parent entity name", "What is the parent entity name?")
    }

    fn ask_name(&self, kind: GeneratorKind) -> Result<String> {
        match kind {
            GeneratorKind::SubEntity => {
                self.require("Sub-entity name", "What is the sub-entity name?")
            }
            _ => self.require("Entity name", "Enter the entity name"),
        }
    }

    /// Ask once; a blank answer is fatal
    fn require(&self, label: &str, message: &str) -> Result<String> {
        let answer = self.prompter.input(message)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(Error::EmptyInput(label.to_string()));
        }
        Ok(answer.to_string())
    }
}
