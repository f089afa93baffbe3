//! Generation use cases behind the CLI commands

use console::style;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::core::config::Settings;
use crate::core::error::{Error, Result};
use crate::generation::{
    GenerationOrchestrator, GenerationOutcome, GenerationRequest, ProcessRenderer, Renderer,
};
use crate::housekeeping::Housekeeping;
use crate::schema::{
    EntitySchema, Prompter, SchemaDocument, SchemaNormalizer, TerminalPrompter,
    validate_schema_file,
};
use crate::templates::{GeneratorKind, TemplateCatalog, TemplateDescriptor};

/// Options shared by every generating command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Entity name given on the command line
    pub name: Option<String>,
    /// Schema file path as typed by the user
    pub schema: Option<PathBuf>,
    /// `--no-prettier`
    pub skip_format: bool,
}

/// Entry point for every generating command
pub struct Application {
    settings: Settings,
    catalog: TemplateCatalog,
    prompter: Box<dyn Prompter>,
    orchestrator: GenerationOrchestrator,
}

impl Application {
    pub fn new(
        settings: Settings,
        prompter: Box<dyn Prompter>,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Self> {
        let catalog = TemplateCatalog::discover(
            &settings.builtin_templates_dir(),
            &settings.custom_templates_dir(),
        )?;
        let housekeeping = Housekeeping::from_settings(&settings);
        let orchestrator = GenerationOrchestrator::new(settings.clone(), renderer, housekeeping);
        Ok(Self {
            settings,
            catalog,
            prompter,
            orchestrator,
        })
    }

    /// Wire up the terminal prompter and the configured renderer process
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let renderer = Arc::new(ProcessRenderer::new(settings.renderer.clone()));
        Self::new(settings, Box::new(TerminalPrompter::new()), renderer)
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Run a generator selected by identifier or alias
    pub async fn generate(
        &self,
        generator: &str,
        options: GenerateOptions,
    ) -> Result<GenerationOutcome> {
        let descriptor = self.catalog.resolve(generator)?;
        self.run(descriptor, options).await
    }

    /// Run a project-local template given as `category/name`
    pub async fn generate_custom(
        &self,
        template: &str,
        options: GenerateOptions,
    ) -> Result<GenerationOutcome> {
        let descriptor = self.catalog.resolve_custom(template)?;
        self.run(descriptor, options).await
    }

    /// Run a property template, asking which one when there are several
    pub async fn add_property(&self, skip_format: bool) -> Result<GenerationOutcome> {
        let descriptor = self.select_property()?;
        let options = GenerateOptions {
            skip_format,
            ..Default::default()
        };
        self.run(descriptor, options).await
    }

    /// None is an error, one is picked automatically, several are offered
    pub fn select_property(&self) -> Result<&TemplateDescriptor> {
        let properties = self.catalog.properties();
        match properties.as_slice() {
            [] => Err(Error::NoPropertyTemplates),
            [only] => Ok(*only),
            many => {
                let labels: Vec<String> = many
                    .iter()
                    .map(|d| {
                        if d.is_custom() {
                            format!("{} (custom)", d.name)
                        } else {
                            d.name.clone()
                        }
                    })
                    .collect();
                let index = self.prompter.select("Select a property template", &labels)?;
                many.get(index)
                    .copied()
                    .ok_or_else(|| Error::Prompt(format!("invalid selection {}", index + 1)))
            }
        }
    }

    async fn run(
        &self,
        descriptor: &TemplateDescriptor,
        options: GenerateOptions,
    ) -> Result<GenerationOutcome> {
        if let Some(path) = &options.schema {
            validate_schema_file(&self.settings.project_dir, path)?;
        }

        let schema = self.schema_for(descriptor.kind(), &options)?;
        // Must outlive the renderer run
        let document = schema.as_ref().map(SchemaDocument::write).transpose()?;
        let entity_name = schema.map(|s| s.name).or(options.name);

        announce(descriptor, entity_name.as_deref());
        let request = GenerationRequest::builder(descriptor.clone())
            .entity_name(entity_name)
            .schema_file(document.as_ref().map(|d| d.path().to_path_buf()))
            .skip_format(options.skip_format)
            .build(&self.settings);
        debug!(template = %descriptor, env = ?request.environment, "Built generation request");

        let outcome = self.orchestrator.generate(&request).await?;
        if !outcome.success {
            return Err(Error::RendererExit(outcome.exit_code));
        }
        Ok(outcome)
    }

    /// Property and other templates only get a schema when a file was given
    fn schema_for(
        &self,
        kind: GeneratorKind,
        options: &GenerateOptions,
    ) -> Result<Option<EntitySchema>> {
        if matches!(kind, GeneratorKind::Property | GeneratorKind::Other) && options.schema.is_none()
        {
            return Ok(None);
        }
        SchemaNormalizer::new(&self.settings.project_dir, self.prompter.as_ref())
            .normalize(kind, options.name.as_deref(), options.schema.as_deref())
            .map(Some)
    }
}

fn announce(descriptor: &TemplateDescriptor, entity_name: Option<&str>) {
    let custom = if descriptor.is_custom() { "custom " } else { "" };
    let line = match (descriptor.kind(), entity_name) {
        (GeneratorKind::Resource, Some(name)) => {
            format!("Generating {custom}main resource with name: {name}")
        }
        (GeneratorKind::SubEntity, Some(name)) => {
            format!("Generating {custom}sub-entity with name: {name}")
        }
        (GeneratorKind::Versioned, Some(name)) => {
            format!("Generating {custom}versioned resource for: {name}")
        }
        (GeneratorKind::Property, _) => {
            format!("Using {custom}property template: {}", descriptor.name)
        }
        (_, Some(name)) => format!("Generating {custom}{} for: {name}", descriptor.short_id()),
        (_, None) => format!("Generating {custom}{}", descriptor.short_id()),
    };
    println!("{}", style(line).blue());
}
