//! Entity schemas: the canonical model, how it is read from JSON files or
//! gathered interactively, and how it is handed to the renderer.

pub mod document;
pub mod model;
pub mod normalizer;
pub mod prompt;

pub use document::SchemaDocument;
pub use model::{EntitySchema, Field, Functionality};
pub use normalizer::{SchemaDraft, SchemaNormalizer, resolve_schema_path, validate_schema_file};
pub use prompt::{Prompter, TerminalPrompter};
