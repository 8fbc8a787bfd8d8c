// ABOUTME: Error types for the slidev-deck tools
// ABOUTME: Groups usage, input, project-state and delegated-process failures

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Usage error: {0}")]
    UsageError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid base64 payload: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Validation failed at {path}: {message}")]
    SchemaError { path: String, message: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("No package.json found in {0}. Initialize a Slidev project first with `slidev-deck init`")]
    NotAProject(PathBuf),

    #[error("Slide {no} not found at {filename}")]
    SlideNotFound { no: u32, filename: String },

    #[error("Slidev dependencies not found in node_modules; run `npm install` in the project first. Missing: {0}")]
    MissingDependencies(String),

    #[error("Audit failed with {0} issue(s)")]
    AuditFailed(usize),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;
