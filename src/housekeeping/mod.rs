//! Post-generation housekeeping.
//!
//! After a successful render the project may need shared utility files the
//! generated code imports, and the generated code gets formatted. Neither step
//! can fail the command: every error goes through [`advisory`], which reports
//! it and moves on.

pub mod common_files;
pub mod formatter;

use console::style;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::core::config::Settings;
pub use common_files::{COMMON_FILES, CommonFiles, CommonFilesOutcome, CopyReport};
pub use formatter::{FormatOutcome, Formatter};

const FORMATTER_HINTS: [&str; 2] = [
    "💡 To install Prettier: npm install --save-dev prettier",
    "💡 Or use --no-prettier flag to skip formatting",
];

/// Errors from housekeeping steps; never escapes [`advisory`]
#[derive(Debug, Error)]
pub enum HousekeepingError {
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Formatter `{0}` not found in this project")]
    FormatterNotFound(String),

    #[error("Failed to start formatter `{program}`: {source}")]
    FormatterSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Exit code 1 usually means the formatter is not installed locally
    #[error("Formatter exited with code 1, it may not be installed in this project")]
    FormatterUnavailable,

    #[error("Formatting failed with code {0} (this is not critical)")]
    FormatterExit(i32),

    #[error("Formatter timed out after {0:?} (this is not critical)")]
    FormatterTimeout(Duration),
}

impl HousekeepingError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Install hints worth showing next to the warning
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::FormatterNotFound(_) | Self::FormatterUnavailable => &FORMATTER_HINTS,
            _ => &[],
        }
    }
}

/// Report a failed housekeeping step and carry on
pub fn advisory<T>(step: &str, result: Result<T, HousekeepingError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(step, error = %e, "Housekeeping step failed");
            println!("{}", style(format!("⚠️  {e}")).yellow());
            for hint in e.hints() {
                println!("{}", style(hint).dim());
            }
            None
        }
    }
}

/// Both housekeeping steps configured for one project
pub struct Housekeeping {
    common: CommonFiles,
    formatter: Formatter,
}

impl Housekeeping {
    pub fn new(common: CommonFiles, formatter: Formatter) -> Self {
        Self { common, formatter }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            CommonFiles::new(settings.common_dir(), &settings.project_dir),
            Formatter::new(
                settings.formatter.clone(),
                &settings.project_dir,
                settings.formatter_timeout,
            ),
        )
    }

    /// Copy shared utilities, then format unless `skip_format`
    pub async fn run(&self, entity_name: Option<&str>, skip_format: bool) {
        advisory("common files", self.common.copy());

        if skip_format {
            println!("{}", style("⏭️  Skipping Prettier formatting").dim());
            return;
        }
        advisory("format", self.formatter.format(entity_name).await);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_advisory_swallows_errors() {
        let result: Result<(), _> =
            Err(HousekeepingError::FormatterTimeout(Duration::from_secs(30)));
        assert!(advisory("format", result).is_none());
        assert!(logs_contain("Housekeeping step failed"));
        assert!(logs_contain("timed out after 30s"));
    }

    #[test]
    fn test_advisory_passes_values_through() {
        assert_eq!(advisory("copy", Ok::<_, HousekeepingError>(3)), Some(3));
    }

    #[test]
    fn test_hints_only_for_missing_formatter() {
        assert_eq!(
            HousekeepingError::FormatterNotFound("npx".into()).hints().len(),
            2
        );
        assert_eq!(HousekeepingError::FormatterUnavailable.hints().len(), 2);
        assert!(HousekeepingError::FormatterExit(2).hints().is_empty());
    }
}
