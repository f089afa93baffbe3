//! Application layer - the use cases behind each CLI command

pub mod commands;
pub mod listing;

pub use commands::{Application, GenerateOptions};
pub use listing::{list_custom, list_templates, list_types, usage_examples};
