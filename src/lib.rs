//! Hexogen Library
//!
//! Scaffolds hexagonal-architecture CRUD modules for NestJS projects. An entity
//! schema (from a JSON file or interactive prompts) is normalized, handed to an
//! external template renderer together with the selected template set, and the
//! generated code is tidied up afterwards.

pub mod application;
pub mod core;
pub mod generation;
pub mod housekeeping;
pub mod schema;
pub mod templates;

pub use crate::{
    application::{Application, GenerateOptions},
    core::{
        config::Settings,
        error::{Error, Result},
    },
    generation::{GenerationOutcome, GenerationRequest},
    schema::{EntitySchema, Field, Functionality},
    templates::{TemplateCatalog, TemplateDescriptor, TemplateSource},
};
