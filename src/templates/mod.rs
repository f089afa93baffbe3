//! Template discovery and selection.

pub mod catalog;
pub mod source;

pub use catalog::{CategoryRoot, GENERATOR_ALIASES, TemplateCatalog};
pub use source::{
    BUILTIN_CATEGORIES, CUSTOM_PREFIX, GeneratorKind, PROPERTY_CATEGORY, TemplateDescriptor,
    TemplateSource,
};
