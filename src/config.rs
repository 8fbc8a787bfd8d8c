// ABOUTME: Configuration module for the slidev-deck tools
// ABOUTME: Provides environment overrides for schemas and the external export command

use std::env;
use std::path::PathBuf;

use crate::export::{ExportConfig, ExportFormat};

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `deck.schema.json` and `slide_patch.schema.json`.
    /// When unset the schemas compiled into the binary are used.
    pub schema_dir: Option<PathBuf>,
    pub npx_command: String,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: None,
            npx_command: "npx".to_string(),
            export_dir: PathBuf::from("exports"),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let schema_dir = env::var("SLIDEV_DECK_SCHEMA_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let npx_command = env::var("SLIDEV_NPX")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "npx".to_string());
        let export_dir = env::var("SLIDEV_EXPORT_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("exports"));

        Self {
            schema_dir,
            npx_command,
            export_dir,
        }
    }

    /// Get an export configuration with defaults from this config
    pub fn get_export_config(
        &self,
        format: Option<ExportFormat>,
        output: Option<PathBuf>,
    ) -> ExportConfig {
        let format = format.unwrap_or_default();
        let output = output.unwrap_or_else(|| {
            self.export_dir
                .join(format!("deck-export.{}", format.extension()))
        });
        ExportConfig {
            program: self.npx_command.clone(),
            format,
            output,
        }
    }
}
