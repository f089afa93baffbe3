//! Running the external template renderer.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::request::GenerationRequest;
use crate::core::config::CommandSpec;
use crate::core::error::{Error, Result};

/// Trait for invoking the template renderer
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Run the renderer for `request` in `project_dir` and return its exit code.
    ///
    /// A process killed by a signal reports `-1`.
    async fn render(&self, request: &GenerationRequest, project_dir: &Path) -> Result<i32>;
}

/// Renderer backed by an external process
pub struct ProcessRenderer {
    command: CommandSpec,
}

impl ProcessRenderer {
    pub fn new(command: CommandSpec) -> Self {
        Self { command }
    }
}

#[async_trait]
impl Renderer for ProcessRenderer {
    async fn render(&self, request: &GenerationRequest, project_dir: &Path) -> Result<i32> {
        debug!(
            command = %self.command,
            args = ?request.template_args,
            cwd = %project_dir.display(),
            "Starting renderer"
        );

        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .args(&request.template_args)
            .envs(&request.environment)
            .current_dir(project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::RendererSpawn {
                program: self.command.program.clone(),
                source,
            })?;

        tokio::select! {
            status = child.wait() => {
                let code = status?.code().unwrap_or(-1);
                info!(exit_code = code, "Renderer finished");
                Ok(code)
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, stopping renderer");
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "Failed to kill renderer");
                }
                Err(Error::Interrupted)
            }
        }
    }
}

/// Renderer double returning canned results
#[cfg(test)]
pub struct MockRenderer {
    pub exit_code: Option<i32>,
    pub calls: std::sync::Mutex<Vec<Vec<String>>>,
    /// Contents of the renderer configuration file seen during the run
    pub seen_config: std::sync::Mutex<Option<String>>,
    /// Schema document handed over through `SCHEMA_FILE`
    pub seen_schema: std::sync::Mutex<Option<serde_json::Value>>,
    pub interrupt: bool,
}

#[cfg(test)]
impl MockRenderer {
    pub fn exiting_with(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            calls: Default::default(),
            seen_config: Default::default(),
            seen_schema: Default::default(),
            interrupt: false,
        }
    }

    /// Behaves like a program that cannot be started
    pub fn missing() -> Self {
        Self {
            exit_code: None,
            ..Self::exiting_with(0)
        }
    }

    pub fn interrupted() -> Self {
        Self {
            interrupt: true,
            ..Self::exiting_with(0)
        }
    }
}

#[cfg(test)]
#[async_trait]
impl Renderer for MockRenderer {
    async fn render(&self, request: &GenerationRequest, project_dir: &Path) -> Result<i32> {
        self.calls
            .lock()
            .unwrap()
            .push(request.template_args.clone());
        *self.seen_config.lock().unwrap() =
            std::fs::read_to_string(project_dir.join(crate::core::config::RENDERER_CONFIG_FILE))
                .ok();
        *self.seen_schema.lock().unwrap() = request
            .environment
            .get("SCHEMA_FILE")
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|raw| serde_json::from_str(&raw).ok());

        if self.interrupt {
            return Err(Error::Interrupted);
        }
        self.exit_code.ok_or_else(|| Error::RendererSpawn {
            program: "mock-renderer".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::config::Settings;
    use crate::templates::{TemplateDescriptor, TemplateSource};
    use std::fs;
    use tempfile::tempdir;

    fn request(settings: &Settings) -> GenerationRequest {
        let descriptor = TemplateDescriptor::new(
            TemplateSource::BuiltIn,
            "generate",
            "relational-resource",
            settings
                .builtin_templates_dir()
                .join("generate/relational-resource"),
        );
        GenerationRequest::builder(descriptor)
            .entity_name(Some("User"))
            .build(settings)
    }

    fn shell(script: &str) -> ProcessRenderer {
        ProcessRenderer::new(CommandSpec::from_parts(["sh", "-c", script]).unwrap())
    }

    #[tokio::test]
    async fn test_process_renderer_passes_args_env_and_cwd() {
        let project = tempdir().unwrap();
        let settings = Settings::new(project.path(), "/opt/hexogen");
        // With `sh -c`, appended arguments start at $0
        let renderer = shell(
            r#"echo "$0 $1 $2 $3" > args.txt; echo "$HYGEN_TMPLS $HYGEN_TMPLS_FORCE" > env.txt"#,
        );

        let code = renderer
            .render(&request(&settings), project.path())
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            fs::read_to_string(project.path().join("args.txt")).unwrap(),
            "generate relational-resource --name User\n"
        );
        assert_eq!(
            fs::read_to_string(project.path().join("env.txt")).unwrap(),
            "/opt/hexogen/templates true\n"
        );
    }

    #[tokio::test]
    async fn test_process_renderer_reports_exit_code() {
        let project = tempdir().unwrap();
        let settings = Settings::new(project.path(), "/opt/hexogen");

        let code = shell("exit 3")
            .render(&request(&settings), project.path())
            .await
            .unwrap();
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn test_process_renderer_signal_is_minus_one() {
        let project = tempdir().unwrap();
        let settings = Settings::new(project.path(), "/opt/hexogen");

        let code = shell("kill -9 $$")
            .render(&request(&settings), project.path())
            .await
            .unwrap();
        assert_eq!(code, -1);
    }

    #[tokio::test]
    async fn test_process_renderer_spawn_failure() {
        let project = tempdir().unwrap();
        let settings = Settings::new(project.path(), "/opt/hexogen");
        let renderer =
            ProcessRenderer::new(CommandSpec::parse("hexogen-no-such-renderer-binary").unwrap());

        let err = renderer
            .render(&request(&settings), project.path())
            .await
            .unwrap_err();
        match err {
            Error::RendererSpawn { program, source } => {
                assert_eq!(program, "hexogen-no-such-renderer-binary");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected RendererSpawn, got {other:?}"),
        }
    }
}
