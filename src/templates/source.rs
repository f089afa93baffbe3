//! Template sources and descriptors.
//!
//! A template set lives at `<root>/<category>/<name>/`. The root is either the
//! tool's install directory ([`TemplateSource::BuiltIn`]) or the project's own
//! `templates/` directory ([`TemplateSource::Custom`]). Custom identifiers are
//! prefixed with `custom:` so a custom set never shadows a built-in one of the
//! same name.

use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix distinguishing project-local template identifiers
pub const CUSTOM_PREFIX: &str = "custom:";

/// Category of top-level resource generators; its identifiers omit the category
pub const GENERATE_CATEGORY: &str = "generate";
pub const SUB_ENTITY_CATEGORY: &str = "generate-sub-entity";
pub const VERSION_CATEGORY: &str = "generate-version";
pub const PROPERTY_CATEGORY: &str = "property";

/// Categories shipped with the tool, in listing order
pub const BUILTIN_CATEGORIES: [&str; 4] = [
    GENERATE_CATEGORY,
    SUB_ENTITY_CATEGORY,
    VERSION_CATEGORY,
    PROPERTY_CATEGORY,
];

/// Where a template set comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateSource {
    /// Shipped in the tool's install directory
    BuiltIn,
    /// Supplied by the project under `templates/`
    Custom,
}

impl TemplateSource {
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn => write!(f, "built-in"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// What a generator produces, derived from its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    Resource,
    SubEntity,
    Versioned,
    Property,
    Other,
}

impl GeneratorKind {
    pub fn from_category(category: &str) -> Self {
        match category {
            GENERATE_CATEGORY => Self::Resource,
            SUB_ENTITY_CATEGORY => Self::SubEntity,
            VERSION_CATEGORY => Self::Versioned,
            PROPERTY_CATEGORY => Self::Property,
            _ => Self::Other,
        }
    }
}

/// A selectable template set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub category: String,
    pub name: String,
    pub source: TemplateSource,
    /// Absolute path of `<root>/<category>/<name>`
    pub resolved_path: PathBuf,
}

impl TemplateDescriptor {
    pub fn new(
        source: TemplateSource,
        category: impl Into<String>,
        name: impl Into<String>,
        resolved_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            source,
            resolved_path: resolved_path.into(),
        }
    }

    /// Identifier without the `custom:` prefix
    pub fn short_id(&self) -> String {
        if self.category == GENERATE_CATEGORY {
            self.name.clone()
        } else {
            format!("{}/{}", self.category, self.name)
        }
    }

    /// Identifier users select the template by
    pub fn id(&self) -> String {
        match self.source {
            TemplateSource::BuiltIn => self.short_id(),
            TemplateSource::Custom => format!("{CUSTOM_PREFIX}{}", self.short_id()),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        GeneratorKind::from_category(&self.category)
    }

    pub fn is_custom(&self) -> bool {
        self.source.is_custom()
    }

    /// Root directory the renderer should load templates from
    pub fn template_root(&self) -> &Path {
        self.resolved_path
            .parent()
            .and_then(Path::parent)
            .unwrap_or(&self.resolved_path)
    }
}

impl fmt::Display for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
