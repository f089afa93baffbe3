//! Canonical entity schema consumed by the templates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::types::FieldType;

/// A single typed property of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    #[serde(
        default,
        rename = "dto",
        alias = "includeInDTO",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_in_dto: Option<bool>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            optional: None,
            custom_type: None,
            example: None,
            include_in_dto: None,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }
}

/// CRUD operations a generated resource can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Functionality {
    #[serde(rename = "create")]
    Create,
    #[serde(rename = "findAll")]
    FindAll,
    #[serde(rename = "findOne")]
    FindOne,
    #[serde(rename = "update")]
    Update,
    #[serde(rename = "delete")]
    Delete,
}

impl Functionality {
    /// All operations in canonical order
    pub const ALL: [Functionality; 5] = [
        Functionality::Create,
        Functionality::FindAll,
        Functionality::FindOne,
        Functionality::Update,
        Functionality::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::FindAll => "findAll",
            Self::FindOne => "findOne",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Sort into canonical order and drop duplicates
    pub fn canonicalize(mut items: Vec<Functionality>) -> Vec<Functionality> {
        items.sort();
        items.dedup();
        items
    }
}

impl FromStr for Functionality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("Unknown functionality: {s}"))
    }
}

impl fmt::Display for Functionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized description of the entity to generate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    pub name: String,
    /// Owning entity; sub-entities only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub is_add_test_case: bool,
    pub functionalities: Vec<Functionality>,
    pub fields: Vec<Field>,
}

impl EntitySchema {
    /// Schema with the documented defaults and no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            is_add_test_case: true,
            functionalities: Functionality::ALL.to_vec(),
            fields: Vec::new(),
        }
    }
}
