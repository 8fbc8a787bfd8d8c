// ABOUTME: Utility functions for the slidev-deck tools
// ABOUTME: Project detection, directory creation and slide filename helpers

use crate::errors::{DeckError, Result};
use std::path::{Path, PathBuf};

/// Name of the presentation entry point at the project root.
pub const MANIFEST_FILE: &str = "slides.md";

/// Directory holding one markdown file per slide.
pub const SLIDES_DIR: &str = "slides";

/// Default file name for slide `no`, zero padded to three digits.
pub fn slide_filename(no: u32) -> String {
    format!("{:03}.md", no)
}

/// Validate that a directory is a Slidev project: it exists and has a package.json
pub fn validate_project(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.join("package.json").is_file() {
        return Err(DeckError::NotAProject(path.to_path_buf()));
    }
    Ok(())
}

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DeckError::UsageError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(DeckError::FileReadError)?;
    } else if !path.is_dir() {
        return Err(DeckError::UsageError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }
    Ok(())
}

/// Get the absolute path, falling back to the path as given when it cannot be resolved
pub fn get_absolute_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
