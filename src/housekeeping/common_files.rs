//! Copies bundled pagination utilities into projects whose code imports them.

use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::HousekeepingError;

/// Bundled file name and its destination directory under `src/common`
pub const COMMON_FILES: [(&str, &str); 4] = [
    ("pagination-options.ts", "types"),
    ("pagination-response.dto.ts", "dto"),
    ("infinity-pagination-response.dto.ts", "dto"),
    ("infinity-pagination.ts", ""),
];

const PAGINATION_MARKERS: [&str; 2] = ["IPaginationOptions", "pagination-options"];

/// What the copy step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonFilesOutcome {
    /// The install directory has no `common/` tree
    NoSource,
    /// The project has no `src/` directory
    NoProjectSources,
    /// No source file references the pagination utilities
    NotNeeded,
    Copied(CopyReport),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: Vec<PathBuf>,
    pub already_present: Vec<PathBuf>,
}

/// Shared-utility copier for one project
pub struct CommonFiles {
    source_dir: PathBuf,
    project_dir: PathBuf,
}

impl CommonFiles {
    pub fn new(source_dir: impl Into<PathBuf>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            project_dir: project_dir.into(),
        }
    }

    /// Copy missing utility files; existing files are never overwritten
    pub fn copy(&self) -> Result<CommonFilesOutcome, HousekeepingError> {
        println!("{}", style("📁 Checking for common utilities...").blue());

        if !self.source_dir.is_dir() {
            println!(
                "{}",
                style("⚠️  Common files not found in package, skipping").yellow()
            );
            return Ok(CommonFilesOutcome::NoSource);
        }

        let src = self.project_dir.join("src");
        if !src.is_dir() {
            println!(
                "{}",
                style("⏭️  No src directory found, skipping common utilities").dim()
            );
            return Ok(CommonFilesOutcome::NoProjectSources);
        }

        if !needs_pagination(&src) {
            println!(
                "{}",
                style("⏭️  No pagination utilities needed, skipping").dim()
            );
            return Ok(CommonFilesOutcome::NotNeeded);
        }

        let target_root = src.join("common");
        let mut report = CopyReport::default();
        for (file, subdir) in COMMON_FILES {
            let source = self.source_dir.join(file);
            if !source.is_file() {
                debug!(path = %source.display(), "Bundled utility missing, skipping");
                continue;
            }

            let target_dir = target_root.join(subdir);
            let target = target_dir.join(file);
            if target.exists() {
                println!("{}", style(format!("  ⏭️  {file} already exists")).dim());
                report.already_present.push(target);
                continue;
            }

            fs::create_dir_all(&target_dir)
                .map_err(|e| HousekeepingError::io("Failed to create", &target_dir, e))?;
            fs::copy(&source, &target)
                .map_err(|e| HousekeepingError::io("Failed to copy", &target, e))?;
            println!("{}", style(format!("  ✓ Copied {file}")).green());
            report.copied.push(target);
        }

        if report.copied.is_empty() {
            println!("{}", style("✓ Common utilities already present").dim());
        } else {
            println!(
                "{}",
                style(format!(
                    "✅ Copied {} common utility file(s) to src/common/",
                    report.copied.len()
                ))
                .green()
            );
        }
        Ok(CommonFilesOutcome::Copied(report))
    }
}

/// Whether any TypeScript source under `src` references the pagination helpers
fn needs_pagination(src: &Path) -> bool {
    WalkDir::new(src)
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "ts"))
        .any(|entry| {
            fs::read_to_string(entry.path())
                .map(|content| PAGINATION_MARKERS.iter().any(|m| content.contains(m)))
                .unwrap_or(false)
        })
}
