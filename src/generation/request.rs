//! A fully resolved renderer invocation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::config::Settings;
use crate::templates::TemplateDescriptor;

/// Everything the orchestrator needs to run one generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub descriptor: TemplateDescriptor,
    /// Arguments appended to the renderer command
    pub template_args: Vec<String>,
    /// Variables added to the renderer's inherited environment
    pub environment: BTreeMap<String, String>,
    pub entity_name: Option<String>,
    pub skip_format: bool,
}

impl GenerationRequest {
    pub fn builder(descriptor: TemplateDescriptor) -> GenerationRequestBuilder {
        GenerationRequestBuilder {
            descriptor,
            entity_name: None,
            schema_file: None,
            skip_format: false,
        }
    }

    /// Directory the renderer loads templates from
    pub fn template_root(&self) -> &Path {
        self.descriptor.template_root()
    }
}

/// Builder for [`GenerationRequest`]
#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder {
    descriptor: TemplateDescriptor,
    entity_name: Option<String>,
    schema_file: Option<PathBuf>,
    skip_format: bool,
}

impl GenerationRequestBuilder {
    pub fn entity_name(mut self, name: Option<impl Into<String>>) -> Self {
        self.entity_name = name
            .map(Into::<String>::into)
            .filter(|n| !n.trim().is_empty());
        self
    }

    pub fn schema_file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.schema_file = path.map(Into::<PathBuf>::into);
        self
    }

    pub fn skip_format(mut self, skip: bool) -> Self {
        self.skip_format = skip;
        self
    }

    pub fn build(self, settings: &Settings) -> GenerationRequest {
        let mut template_args = vec![self.descriptor.category.clone(), self.descriptor.name.clone()];
        if let Some(name) = &self.entity_name {
            template_args.push("--name".to_string());
            template_args.push(name.clone());
        }
        if let Some(schema) = &self.schema_file {
            template_args.push("--schema".to_string());
            template_args.push(schema.display().to_string());
        }

        let template_root = self.descriptor.template_root().display().to_string();
        let mut environment = BTreeMap::new();
        environment.insert("HYGEN_TMPLS".to_string(), template_root.clone());
        environment.insert("HYGEN_TMPLS_DIR".to_string(), template_root);
        environment.insert("HYGEN_TMPLS_FORCE".to_string(), "true".to_string());
        environment.insert(
            "HEXOGEN_PACKAGE_DIR".to_string(),
            settings.package_dir.display().to_string(),
        );
        environment.insert(
            "USE_CUSTOM_TEMPLATES".to_string(),
            self.descriptor.is_custom().to_string(),
        );
        environment.insert("SKIP_PRETTIER".to_string(), self.skip_format.to_string());
        if let Some(schema) = &self.schema_file {
            environment.insert("SCHEMA_FILE".to_string(), schema.display().to_string());
        }

        GenerationRequest {
            descriptor: self.descriptor,
            template_args,
            environment,
            entity_name: self.entity_name,
            skip_format: self.skip_format,
        }
    }
}

/// Result of a renderer run that actually started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub success: bool,
    pub exit_code: i32,
}

impl GenerationOutcome {
    pub fn from_exit_code(exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateSource;

    fn settings() -> Settings {
        Settings::new("/work/app", "/opt/hexogen")
    }

    fn resource() -> TemplateDescriptor {
        TemplateDescriptor::new(
            TemplateSource::BuiltIn,
            "generate",
            "relational-resource",
            "/opt/hexogen/templates/generate/relational-resource",
        )
    }

    #[test]
    fn test_builtin_request_with_schema() {
        let request = GenerationRequest::builder(resource())
            .entity_name(Some("User"))
            .schema_file(Some("/tmp/hexogen-schema-1.json"))
            .build(&settings());

        assert_eq!(
            request.template_args,
            vec![
                "generate",
                "relational-resource",
                "--name",
                "User",
                "--schema",
                "/tmp/hexogen-schema-1.json"
            ]
        );
        assert_eq!(request.environment["HYGEN_TMPLS"], "/opt/hexogen/templates");
        assert_eq!(request.environment["HYGEN_TMPLS_DIR"], "/opt/hexogen/templates");
        assert_eq!(request.environment["HYGEN_TMPLS_FORCE"], "true");
        assert_eq!(request.environment["HEXOGEN_PACKAGE_DIR"], "/opt/hexogen");
        assert_eq!(request.environment["USE_CUSTOM_TEMPLATES"], "false");
        assert_eq!(request.environment["SKIP_PRETTIER"], "false");
        assert_eq!(
            request.environment["SCHEMA_FILE"],
            "/tmp/hexogen-schema-1.json"
        );
        assert_eq!(request.entity_name.as_deref(), Some("User"));
    }

    #[test]
    fn test_custom_request_without_schema() {
        let descriptor = TemplateDescriptor::new(
            TemplateSource::Custom,
            "test",
            "unit-test",
            "/work/app/templates/test/unit-test",
        );
        let request = GenerationRequest::builder(descriptor)
            .entity_name(None::<String>)
            .schema_file(None::<PathBuf>)
            .skip_format(true)
            .build(&settings());

        assert_eq!(request.template_args, vec!["test", "unit-test"]);
        assert_eq!(request.template_root(), Path::new("/work/app/templates"));
        assert_eq!(request.environment["HYGEN_TMPLS"], "/work/app/templates");
        assert_eq!(request.environment["USE_CUSTOM_TEMPLATES"], "true");
        assert_eq!(request.environment["SKIP_PRETTIER"], "true");
        assert!(!request.environment.contains_key("SCHEMA_FILE"));
        assert!(request.skip_format);
    }

    #[test]
    fn test_blank_entity_name_is_dropped() {
        let request = GenerationRequest::builder(resource())
            .entity_name(Some("  "))
            .build(&settings());
        assert_eq!(request.template_args.len(), 2);
        assert!(request.entity_name.is_none());
    }

    #[test]
    fn test_outcome_from_exit_code() {
        assert!(GenerationOutcome::from_exit_code(0).success);
        let failed = GenerationOutcome::from_exit_code(3);
        assert!(!failed.success);
        assert_eq!(failed.exit_code, 3);
    }
}
