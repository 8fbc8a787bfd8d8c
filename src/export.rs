// ABOUTME: Export wrapper for the slidev-deck tools
// ABOUTME: Delegates to `slidev export` and propagates its exit status

use crate::errors::{DeckError, Result};
use crate::utils::{ensure_parent_directory_exists, validate_project};
use clap::ValueEnum;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Formats `slidev export` can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Pptx,
    Pdf,
    Png,
    Md,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pptx => "pptx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
            ExportFormat::Md => "md",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration for one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Launcher for the Slidev CLI, normally `npx`
    pub program: String,
    pub format: ExportFormat,
    /// Output path, relative to the project unless absolute
    pub output: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            format: ExportFormat::Pptx,
            output: PathBuf::from("exports/deck-export.pptx"),
        }
    }
}

/// Export a project with the external Slidev CLI, returning the output path
pub fn export_deck(project: &Path, config: &ExportConfig) -> Result<PathBuf> {
    validate_project(project)?;
    let output = project.join(&config.output);
    ensure_parent_directory_exists(&output)?;

    info!("Exporting {:?} to {} via {}", project, config.format, config.program);
    let status = Command::new(&config.program)
        .arg("slidev")
        .arg("export")
        .arg("--format")
        .arg(config.format.extension())
        .arg("--output")
        .arg(&config.output)
        .current_dir(project)
        .status()
        .map_err(|e| {
            DeckError::ExportFailed(format!("failed to launch {}: {}", config.program, e))
        })?;

    if !status.success() {
        return Err(DeckError::ExportFailed(format!(
            "`{} slidev export --format {}` exited with {}",
            config.program, config.format, status
        )));
    }

    Ok(output)
}
