//! Error handling for the hexogen generator.
//!
//! This module defines the main error type `Error` used throughout the crate,
//! along with a convenient `Result` type alias. Every variant is fatal for the
//! current invocation: the binary prints it and exits non-zero. Post-generation
//! housekeeping has its own error type (see [`crate::housekeeping`]) which is
//! never converted into this one.
//!
//! # Examples
//!
//! ```
//! use hexogen::core::error::{Error, Result};
//!
//! fn require(answer: &str) -> Result<String> {
//!     if answer.trim().is_empty() {
//!         return Err(Error::EmptyInput("Entity name".into()));
//!     }
//!     Ok(answer.trim().to_string())
//! }
//!
//! assert!(require("  ").is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type for hexogen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for hexogen operations
#[derive(Debug, Error)]
pub enum Error {
    /// The schema file passed with `--schema` does not exist
    #[error("Schema file not found: {}", .0.display())]
    SchemaNotFound(PathBuf),

    /// The schema file exists but is not valid JSON
    #[error("Invalid JSON in schema file {}: {source}", path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The schema file parsed but cannot describe an entity
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// No template set matches the requested generator name
    #[error("Unknown generator: {name}. Available generators: {}", available.join(", "))]
    UnknownGenerator {
        name: String,
        available: Vec<String>,
    },

    /// `property` was requested but no property template is installed
    #[error("No property templates found")]
    NoPropertyTemplates,

    /// A required prompt was answered with a blank line
    #[error("{0} is required")]
    EmptyInput(String),

    /// The terminal prompt itself failed (closed stdin, not a tty, ...)
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// The renderer ran but exited unsuccessfully
    #[error("Renderer failed with code {0}")]
    RendererExit(i32),

    /// The renderer could not be started at all
    #[error("Failed to start renderer `{program}`: {source}")]
    RendererSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Generation was interrupted by the user
    #[error("Generation interrupted")]
    Interrupted,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Template(#[from] tera::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid schema error
    pub fn invalid_schema<S: Into<String>>(msg: S) -> Self {
        Self::InvalidSchema(msg.into())
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
