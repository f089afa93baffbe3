//! Core building blocks shared by every layer: configuration, errors and the
//! field-type tables.

pub mod config;
pub mod error;
pub mod types;

pub use error::{Error, Result};
