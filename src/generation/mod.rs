//! Generation domain module - drives the external renderer
//!
//! A [`GenerationRequest`] names a template set, the renderer arguments and
//! environment. The [`GenerationOrchestrator`] installs the renderer's
//! configuration, runs the [`Renderer`], restores the configuration and hands
//! successful runs to housekeeping.

pub mod orchestrator;
pub mod renderer;
pub mod renderer_config;
pub mod request;

pub use orchestrator::GenerationOrchestrator;
pub use renderer::{ProcessRenderer, Renderer};
pub use renderer_config::{RendererConfigGuard, render_config};
pub use request::{GenerationOutcome, GenerationRequest, GenerationRequestBuilder};
