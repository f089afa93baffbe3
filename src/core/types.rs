//! Field-type mapping for generated TypeScript code.
//!
//! Schema fields carry an abstract type tag (`varchar`, `timestamp`, ...). The
//! templates need two renderings of that tag:
//!
//! - the canonical TypeScript type used in class property declarations
//!   (`string`, `number`, `Date`, ...), see [`map_type`];
//! - the constructor-style type handed to decorators such as
//!   `@ApiProperty({ type: String })`, see [`map_decorator_type`].
//!
//! Both mappings are total: unknown tags degrade to `any` and to the tag itself
//! respectively. The strings are emitted verbatim into generated code and must
//! stay byte-for-byte identical to what the target project expects.
//!
//! # Examples
//!
//! ```
//! use hexogen::core::types::{map_decorator_type, map_type, FieldType};
//!
//! assert_eq!(map_type("varchar"), "string");
//! assert_eq!(map_decorator_type("int"), "Number");
//! assert_eq!(map_type("geometry"), "any");
//! assert_eq!(map_decorator_type("geometry"), "geometry");
//!
//! let ty: FieldType = "timestamp".parse().unwrap();
//! assert_eq!(ty.ts_type(), "Date");
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Abstract field type tag as written in entity schemas
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Varchar,
    Text,
    Uuid,
    Int,
    Float,
    Double,
    Boolean,
    Timestamp,
    Date,
    Json,
    Decimal,
    Char,
    Longtext,
    Smallint,
    Int4,
    Int8,
    Int16,
    Int32,
    Uint8,
    Uint16,
    Uint32,
    Bigint,
    /// Any tag outside the known vocabulary, kept verbatim
    Other(String),
}

impl FieldType {
    /// Every tag of the known vocabulary, in declaration order
    pub const KNOWN: [FieldType; 22] = [
        FieldType::Varchar,
        FieldType::Text,
        FieldType::Uuid,
        FieldType::Int,
        FieldType::Float,
        FieldType::Double,
        FieldType::Boolean,
        FieldType::Timestamp,
        FieldType::Date,
        FieldType::Json,
        FieldType::Decimal,
        FieldType::Char,
        FieldType::Longtext,
        FieldType::Smallint,
        FieldType::Int4,
        FieldType::Int8,
        FieldType::Int16,
        FieldType::Int32,
        FieldType::Uint8,
        FieldType::Uint16,
        FieldType::Uint32,
        FieldType::Bigint,
    ];

    /// Returns the schema tag as a string slice
    pub fn as_str(&self) -> &str {
        match self {
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::Uuid => "uuid",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Date => "date",
            Self::Json => "json",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::Longtext => "longtext",
            Self::Smallint => "smallint",
            Self::Int4 => "int4",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Bigint => "bigint",
            Self::Other(tag) => tag,
        }
    }

    /// Canonical TypeScript type for property declarations
    pub fn ts_type(&self) -> &'static str {
        match self {
            Self::Varchar | Self::Text | Self::Uuid | Self::Decimal => "string",
            Self::Char | Self::Longtext => "string",
            Self::Int | Self::Float | Self::Double => "number",
            Self::Int4
            | Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::Uint8
            | Self::Uint16
            | Self::Uint32
            | Self::Smallint => "number",
            Self::Boolean => "boolean",
            Self::Timestamp | Self::Date => "Date",
            Self::Json => "object",
            Self::Bigint => "bigint",
            Self::Other(_) => "any",
        }
    }

    /// Constructor-style type for decorators; unknown tags pass through
    pub fn decorator_type(&self) -> Cow<'_, str> {
        match self {
            Self::Varchar
            | Self::Text
            | Self::Uuid
            | Self::Decimal
            | Self::Char
            | Self::Longtext => Cow::Borrowed("String"),
            Self::Int
            | Self::Float
            | Self::Double
            | Self::Int4
            | Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::Uint8
            | Self::Uint16
            | Self::Uint32
            | Self::Smallint => Cow::Borrowed("Number"),
            Self::Boolean => Cow::Borrowed("Boolean"),
            Self::Timestamp | Self::Date => Cow::Borrowed("Date"),
            Self::Json => Cow::Borrowed("Object"),
            Self::Bigint | Self::Other(_) => Cow::Borrowed(self.as_str()),
        }
    }

    /// Whether the tag belongs to the known vocabulary
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl FromStr for FieldType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "varchar" => Self::Varchar,
            "text" => Self::Text,
            "uuid" => Self::Uuid,
            "int" => Self::Int,
            "float" => Self::Float,
            "double" => Self::Double,
            "boolean" => Self::Boolean,
            "timestamp" => Self::Timestamp,
            "date" => Self::Date,
            "json" => Self::Json,
            "decimal" => Self::Decimal,
            "char" => Self::Char,
            "longtext" => Self::Longtext,
            "smallint" => Self::Smallint,
            "int4" => Self::Int4,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "bigint" => Self::Bigint,
            _ => Self::Other(tag),
        }
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        match ty {
            FieldType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a raw field tag to its canonical TypeScript type
pub fn map_type(tag: &str) -> &'static str {
    FieldType::from(tag.to_string()).ts_type()
}

/// Map a raw field tag to its decorator type, passing unknown tags through
pub fn map_decorator_type(tag: &str) -> Cow<'_, str> {
    match FieldType::from(tag.to_string()).decorator_type() {
        // Passthrough tags borrow from the caller instead of the temporary
        Cow::Borrowed(s) if s == tag => Cow::Borrowed(tag),
        other => Cow::Owned(other.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table() {
        for tag in ["varchar", "text", "uuid", "decimal", "char", "longtext"] {
            assert_eq!(map_type(tag), "string", "{tag}");
        }
        for tag in [
            "int", "float", "double", "int4", "int8", "int16", "int32", "uint8", "uint16",
            "uint32", "smallint",
        ] {
            assert_eq!(map_type(tag), "number", "{tag}");
        }
        assert_eq!(map_type("boolean"), "boolean");
        assert_eq!(map_type("timestamp"), "Date");
        assert_eq!(map_type("date"), "Date");
        assert_eq!(map_type("json"), "object");
        assert_eq!(map_type("bigint"), "bigint");
        assert_eq!(map_type("point"), "any");
        assert_eq!(map_type(""), "any");
    }

    #[test]
    fn test_decorator_table() {
        for tag in ["varchar", "text", "uuid", "decimal", "char", "longtext"] {
            assert_eq!(map_decorator_type(tag), "String", "{tag}");
        }
        for tag in [
            "int", "float", "double", "int4", "int8", "int16", "int32", "uint8", "uint16",
            "uint32", "smallint",
        ] {
            assert_eq!(map_decorator_type(tag), "Number", "{tag}");
        }
        assert_eq!(map_decorator_type("boolean"), "Boolean");
        assert_eq!(map_decorator_type("timestamp"), "Date");
        assert_eq!(map_decorator_type("json"), "Object");
        assert_eq!(map_decorator_type("bigint"), "bigint");
        assert_eq!(map_decorator_type("MyEnum"), "MyEnum");
    }

    #[test]
    fn test_mapping_is_pure() {
        for ty in FieldType::KNOWN.iter() {
            let tag = ty.as_str();
            assert_eq!(map_type(tag), map_type(tag));
            assert_eq!(map_decorator_type(tag), map_decorator_type(tag));
            assert!(ty.is_known());
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!("VARCHAR".parse::<FieldType>().unwrap(), FieldType::Other("VARCHAR".into()));
        assert_eq!(map_type("VARCHAR"), "any");
    }

    #[test]
    fn test_serde_round_trips_through_tag() {
        let ty: FieldType = serde_json::from_str("\"uint16\"").unwrap();
        assert_eq!(ty, FieldType::Uint16);
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"uint16\"");

        let other: FieldType = serde_json::from_str("\"geometry\"").unwrap();
        assert_eq!(other.to_string(), "geometry");
        assert!(!other.is_known());
    }
}
