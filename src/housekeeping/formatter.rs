//! Formats freshly generated code with an external formatter.

use console::style;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use super::HousekeepingError;
use crate::core::config::CommandSpec;

/// How a formatting step ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Formatted(PathBuf),
    /// Neither the entity directory nor `src/` exists
    NoTarget,
}

/// Formatter command bound to a project
pub struct Formatter {
    command: CommandSpec,
    project_dir: PathBuf,
    timeout: Duration,
}

impl Formatter {
    pub fn new(command: CommandSpec, project_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            command,
            project_dir: project_dir.into(),
            timeout,
        }
    }

    /// Directory to format, relative to the project: `src/<name>s/` when it
    /// exists, else `src/` when it exists
    pub fn target(&self, entity_name: Option<&str>) -> Option<String> {
        let entity_dir = entity_name
            .map(|name| format!("src/{}s/", name.to_lowercase()))
            .filter(|dir| self.project_dir.join(dir).is_dir());
        entity_dir.or_else(|| {
            self.project_dir
                .join("src")
                .is_dir()
                .then(|| "src/".to_string())
        })
    }

    /// Run the formatter over the generated code, killing it after the timeout
    pub async fn format(&self, entity_name: Option<&str>) -> Result<FormatOutcome, HousekeepingError> {
        println!("{}", style("🧼 Running Prettier...").blue());

        let Some(target) = self.target(entity_name) else {
            println!(
                "{}",
                style("⚠️  Target directory not found, skipping Prettier").yellow()
            );
            return Ok(FormatOutcome::NoTarget);
        };

        debug!(command = %self.command, dir = %target, "Starting formatter");
        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(&target)
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => {
                    HousekeepingError::FormatterNotFound(self.command.program.clone())
                }
                _ => HousekeepingError::FormatterSpawn {
                    program: self.command.program.clone(),
                    source,
                },
            })?;

        let status = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(status) => status.map_err(|e| {
                HousekeepingError::io("Failed to wait for formatter on", &self.project_dir, e)
            })?,
            Err(_) => {
                // Best effort; kill_on_drop covers the rest
                let _ = child.kill().await;
                return Err(HousekeepingError::FormatterTimeout(self.timeout));
            }
        };

        match status.code() {
            Some(0) => {
                info!(dir = %target, "Formatting completed");
                println!("{}", style("✨ Prettier formatting completed").green());
                Ok(FormatOutcome::Formatted(PathBuf::from(target)))
            }
            Some(1) => Err(HousekeepingError::FormatterUnavailable),
            code => Err(HousekeepingError::FormatterExit(code.unwrap_or(-1))),
        }
    }
}
