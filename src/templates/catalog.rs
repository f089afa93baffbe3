//! Declarative catalog of every installed template set.
//!
//! The catalog is built once per invocation from a manifest of category roots:
//! the fixed built-in categories under the install directory, followed by every
//! category directory found under the project's `templates/`. Each root is
//! scanned for template-set subdirectories in name order.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::source::{
    BUILTIN_CATEGORIES, CUSTOM_PREFIX, GENERATE_CATEGORY, PROPERTY_CATEGORY, TemplateDescriptor,
    TemplateSource,
};
use crate::core::error::{Error, Result};

/// Shorthand generator names accepted wherever a generator is selected
pub const GENERATOR_ALIASES: [(&str, &str); 3] = [
    ("resource", "relational-resource"),
    ("subentity", "generate-sub-entity/relational-resource"),
    ("versioned", "generate-version/add-to-relational-resource"),
];

/// One `<root>/<category>` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRoot {
    pub source: TemplateSource,
    pub category: String,
    pub path: PathBuf,
}

/// All template sets visible to this invocation
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    roots: Vec<CategoryRoot>,
    entries: Vec<TemplateDescriptor>,
}

impl TemplateCatalog {
    /// Scan the built-in and custom template trees
    pub fn discover(builtin_root: &Path, custom_root: &Path) -> Result<Self> {
        let mut roots: Vec<CategoryRoot> = BUILTIN_CATEGORIES
            .iter()
            .map(|category| CategoryRoot {
                source: TemplateSource::BuiltIn,
                category: category.to_string(),
                path: builtin_root.join(category),
            })
            .filter(|root| root.path.is_dir())
            .collect();

        // Built-in categories first so custom sets list in the same order
        let mut custom_categories = subdirectories(custom_root)?;
        custom_categories.sort_by_key(|name| {
            BUILTIN_CATEGORIES
                .iter()
                .position(|c| c == name)
                .unwrap_or(BUILTIN_CATEGORIES.len())
        });
        roots.extend(custom_categories.into_iter().map(|category| CategoryRoot {
            source: TemplateSource::Custom,
            path: custom_root.join(&category),
            category,
        }));

        let mut entries = Vec::new();
        for root in &roots {
            for name in subdirectories(&root.path)? {
                entries.push(TemplateDescriptor::new(
                    root.source,
                    root.category.clone(),
                    name.clone(),
                    root.path.join(&name),
                ));
            }
        }

        debug!(
            builtin_root = %builtin_root.display(),
            custom_root = %custom_root.display(),
            roots = roots.len(),
            templates = entries.len(),
            "Discovered templates"
        );
        Ok(Self { roots, entries })
    }

    pub fn roots(&self) -> &[CategoryRoot] {
        &self.roots
    }

    /// Every generator (non-property template), built-in first, unique by identifier
    pub fn generators(&self) -> Vec<&TemplateDescriptor> {
        let mut seen = HashSet::new();
        self.ordered()
            .filter(|d| d.category != PROPERTY_CATEGORY)
            .filter(|d| seen.insert(d.id()))
            .collect()
    }

    /// Custom generators only
    pub fn custom_generators(&self) -> Vec<&TemplateDescriptor> {
        self.generators()
            .into_iter()
            .filter(|d| d.is_custom())
            .collect()
    }

    /// Property templates, built-in first
    pub fn properties(&self) -> Vec<&TemplateDescriptor> {
        self.ordered()
            .filter(|d| d.category == PROPERTY_CATEGORY)
            .collect()
    }

    /// Category names: built-in ones present, then extra custom ones
    pub fn template_types(&self) -> (Vec<&str>, Vec<&str>) {
        let builtin: Vec<&str> = BUILTIN_CATEGORIES
            .iter()
            .copied()
            .filter(|c| self.roots.iter().any(|r| r.category == *c))
            .collect();
        let custom = self
            .roots
            .iter()
            .filter(|r| r.source.is_custom() && !BUILTIN_CATEGORIES.contains(&r.category.as_str()))
            .map(|r| r.category.as_str())
            .collect();
        (builtin, custom)
    }

    /// Resolve a generator identifier or alias
    pub fn resolve(&self, name: &str) -> Result<&TemplateDescriptor> {
        let wanted = Self::expand_alias(name);
        self.generators()
            .into_iter()
            .find(|d| d.id() == wanted)
            .ok_or_else(|| self.unknown(name))
    }

    /// Resolve a custom template given as `category/name` (or bare `name` for `generate`)
    pub fn resolve_custom(&self, template: &str) -> Result<&TemplateDescriptor> {
        let template = template.strip_prefix(CUSTOM_PREFIX).unwrap_or(template);
        let template = template
            .strip_prefix(&format!("{GENERATE_CATEGORY}/"))
            .unwrap_or(template);
        let wanted = format!("{CUSTOM_PREFIX}{template}");
        self.custom_generators()
            .into_iter()
            .find(|d| d.id() == wanted)
            .ok_or_else(|| Error::UnknownGenerator {
                name: template.to_string(),
                available: self.custom_generators().iter().map(|d| d.short_id()).collect(),
            })
    }

    fn expand_alias(name: &str) -> &str {
        GENERATOR_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, target)| *target)
            .unwrap_or(name)
    }

    fn unknown(&self, name: &str) -> Error {
        Error::UnknownGenerator {
            name: name.to_string(),
            available: self.generators().iter().map(|d| d.id()).collect(),
        }
    }

    fn ordered(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        let builtin = self.entries.iter().filter(|d| !d.is_custom());
        let custom = self.entries.iter().filter(|d| d.is_custom());
        builtin.chain(custom)
    }
}

/// Sorted names of the directories directly under `dir`; missing dir is empty
fn subdirectories(dir: &Path) -> Result<Vec<String>> {
    let read = match std::fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in read {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
