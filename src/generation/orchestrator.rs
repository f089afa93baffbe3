//! Generation orchestration - coordinates one renderer run

use console::style;
use std::sync::Arc;
use tracing::{debug, info};

use super::renderer::Renderer;
use super::renderer_config::{RendererConfigGuard, render_config};
use super::request::{GenerationOutcome, GenerationRequest};
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::housekeeping::Housekeeping;

/// Runs a generator with the renderer configuration in place, then tidies up
pub struct GenerationOrchestrator {
    settings: Settings,
    renderer: Arc<dyn Renderer>,
    housekeeping: Housekeeping,
}

impl GenerationOrchestrator {
    /// Create a new generation orchestrator
    pub fn new(settings: Settings, renderer: Arc<dyn Renderer>, housekeeping: Housekeeping) -> Self {
        Self {
            settings,
            renderer,
            housekeeping,
        }
    }

    /// Execute the generation workflow.
    ///
    /// The renderer configuration file is back to its original state by the
    /// time this returns, on every path.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        debug!(
            template = %request.descriptor,
            args = ?request.template_args,
            "Orchestrator starting generation"
        );

        // 1. Point the renderer at the right template tree
        let contents = render_config(request.template_root(), !request.descriptor.is_custom())?;
        let mut guard =
            RendererConfigGuard::install(self.settings.renderer_config_path(), &contents)?;

        // 2. Run the renderer and restore the configuration whatever happened
        let result = self
            .renderer
            .render(request, &self.settings.project_dir)
            .await;
        guard.restore();
        let outcome = GenerationOutcome::from_exit_code(result?);

        // 3. Report, and tidy up only after success
        if !outcome.success {
            println!(
                "{}",
                style(format!("✖ Renderer failed with code {}", outcome.exit_code)).red()
            );
            return Ok(outcome);
        }

        info!(template = %request.descriptor, "Generation succeeded");
        println!("{}", style("✔ Success!").green());
        self.housekeeping
            .run(request.entity_name.as_deref(), request.skip_format)
            .await;
        Ok(outcome)
    }
}
