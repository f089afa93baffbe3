//! Runtime configuration for hexogen.
//!
//! Settings are resolved once at startup from three layers, later layers
//! winning: built-in defaults, an optional `hexogen.toml` in the project
//! directory, then environment variables.
//!
//! ```toml
//! [renderer]
//! command = ["npx", "hygen"]
//!
//! [formatter]
//! command = ["npx", "prettier", "--write"]
//! timeout_secs = 30
//! ```
//!
//! Environment variables:
//! - `HEXOGEN_PACKAGE_DIR`: install directory holding `templates/` and `common/`
//! - `HEXOGEN_RENDERER`: renderer command, whitespace separated
//! - `HEXOGEN_FORMATTER`: formatter command, whitespace separated
//! - `HEXOGEN_FORMATTER_TIMEOUT`: formatter timeout in seconds

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::core::error::{Error, Result};

/// Name of the optional project-level configuration file
pub const PROJECT_CONFIG_FILE: &str = "hexogen.toml";

/// Name of the renderer configuration file temporarily written into the project
pub const RENDERER_CONFIG_FILE: &str = ".hygen.js";

const DEFAULT_FORMATTER_TIMEOUT_SECS: u64 = 30;

/// Trait for reading environment configuration, allowing dependency injection for testing
pub trait EnvReader {
    fn var(&self, key: &str) -> Option<String>;
}

/// Production implementation that reads from the process environment
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

/// Fixed key/value environment for tests
#[cfg(test)]
pub struct MapEnv(pub std::collections::HashMap<String, String>);

#[cfg(test)]
impl MapEnv {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
impl EnvReader for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// An external program plus its leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build a command from a non-empty argument vector
    pub fn from_parts<I, S>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parts = parts.into_iter().map(Into::<String>::into);
        let program = parts
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| Error::config("command must not be empty"))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Parse a whitespace separated command line
    pub fn parse(line: &str) -> Result<Self> {
        Self::from_parts(line.split_whitespace())
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Shape of `hexogen.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    renderer: RendererSection,
    #[serde(default)]
    formatter: FormatterSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RendererSection {
    command: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FormatterSection {
    command: Option<Vec<String>>,
    timeout_secs: Option<u64>,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the user runs hexogen in; generated files land here
    pub project_dir: PathBuf,
    /// Install directory holding the built-in `templates/` and `common/` trees
    pub package_dir: PathBuf,
    /// Renderer command; generator arguments are appended
    pub renderer: CommandSpec,
    /// Formatter command; the target directory is appended
    pub formatter: CommandSpec,
    /// Hard ceiling on the formatter's run time
    pub formatter_timeout: Duration,
}

impl Settings {
    /// Resolve settings for the current process
    pub fn load() -> Result<Self> {
        let project_dir = std::env::current_dir()?;
        Self::load_with(&project_dir, &ProcessEnv)
    }

    /// Resolve settings for a project directory with an explicit environment
    pub fn load_with(project_dir: &Path, env: &dyn EnvReader) -> Result<Self> {
        let file = Self::read_project_config(project_dir)?;

        let mut renderer = CommandSpec::from_parts(["npx", "hygen"])?;
        let mut formatter = CommandSpec::from_parts(["npx", "prettier", "--write"])?;
        let mut timeout_secs = DEFAULT_FORMATTER_TIMEOUT_SECS;

        if let Some(parts) = file.renderer.command {
            renderer = CommandSpec::from_parts(parts)
                .map_err(|_| Error::config("[renderer] command must not be empty"))?;
        }
        if let Some(parts) = file.formatter.command {
            formatter = CommandSpec::from_parts(parts)
                .map_err(|_| Error::config("[formatter] command must not be empty"))?;
        }
        if let Some(secs) = file.formatter.timeout_secs {
            timeout_secs = secs;
        }

        if let Some(line) = env.var("HEXOGEN_RENDERER") {
            renderer = CommandSpec::parse(&line)?;
        }
        if let Some(line) = env.var("HEXOGEN_FORMATTER") {
            formatter = CommandSpec::parse(&line)?;
        }
        if let Some(raw) = env.var("HEXOGEN_FORMATTER_TIMEOUT") {
            timeout_secs = raw.trim().parse().map_err(|_| {
                Error::config(format!("HEXOGEN_FORMATTER_TIMEOUT must be seconds, got '{raw}'"))
            })?;
        }

        let package_dir = Self::resolve_package_dir(env);
        debug!(
            project_dir = %project_dir.display(),
            package_dir = %package_dir.display(),
            renderer = %renderer,
            formatter = %formatter,
            timeout_secs,
            "Resolved settings"
        );

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            package_dir,
            renderer,
            formatter,
            formatter_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Default settings for explicit project and package directories
    pub fn new(project_dir: impl Into<PathBuf>, package_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            package_dir: package_dir.into(),
            renderer: CommandSpec {
                program: "npx".to_string(),
                args: vec!["hygen".to_string()],
            },
            formatter: CommandSpec {
                program: "npx".to_string(),
                args: vec!["prettier".to_string(), "--write".to_string()],
            },
            formatter_timeout: Duration::from_secs(DEFAULT_FORMATTER_TIMEOUT_SECS),
        }
    }

    /// Built-in template tree shipped with the tool
    pub fn builtin_templates_dir(&self) -> PathBuf {
        self.package_dir.join("templates")
    }

    /// Project-local custom template tree
    pub fn custom_templates_dir(&self) -> PathBuf {
        self.project_dir.join("templates")
    }

    /// Bundled shared utilities copied into projects after generation
    pub fn common_dir(&self) -> PathBuf {
        self.package_dir.join("common")
    }

    /// Location of the temporary renderer configuration file
    pub fn renderer_config_path(&self) -> PathBuf {
        self.project_dir.join(RENDERER_CONFIG_FILE)
    }

    fn read_project_config(project_dir: &Path) -> Result<FileConfig> {
        let path = project_dir.join(PROJECT_CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(raw) => {
                debug!(path = %path.display(), "Loading project configuration");
                toml::from_str(&raw).map_err(|e| {
                    Error::config(format!("{}: {}", path.display(), e.message()))
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Find the install directory by checking standard locations
    fn resolve_package_dir(env: &dyn EnvReader) -> PathBuf {
        if let Some(dir) = env.var("HEXOGEN_PACKAGE_DIR") {
            return PathBuf::from(dir);
        }

        let locations = Self::package_search_locations(env);
        if let Some(found) = locations
            .iter()
            .find(|location| location.join("templates").is_dir())
        {
            return found.clone();
        }

        debug!("No templates directory found in any standard location");
        locations.into_iter().next().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get list of locations to search for the install directory
    fn package_search_locations(env: &dyn EnvReader) -> Vec<PathBuf> {
        let mut locations = Vec::new();

        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let exe_dir = exe_dir.canonicalize().unwrap_or_else(|_| exe_dir.to_path_buf());
                if let Some(parent_dir) = exe_dir.parent() {
                    let parent_dir = parent_dir.to_path_buf();
                    locations.push(exe_dir);
                    locations.push(parent_dir);
                } else {
                    locations.push(exe_dir);
                }
            }
        }

        // Development checkout
        if let Some(manifest_dir) = env.var("CARGO_MANIFEST_DIR") {
            locations.push(PathBuf::from(manifest_dir));
        }

        if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join("hexogen"));
        }

        locations
    }
}
