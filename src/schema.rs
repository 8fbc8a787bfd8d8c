// ABOUTME: Bundled JSON Schemas for deck and slide patch documents
// ABOUTME: Loads the schema for a document kind and reports every violation

use crate::config::Config;
use crate::errors::{DeckError, Result};
use clap::ValueEnum;
use log::{debug, warn};
use serde_json::Value;
use std::fmt;
use std::fs;

/// Deck schema, embedded at compile time.
pub const DECK_SCHEMA: &str = include_str!("../schema/deck.schema.json");

/// Slide patch schema, embedded at compile time.
pub const SLIDE_PATCH_SCHEMA: &str = include_str!("../schema/slide_patch.schema.json");

/// Which of the two document shapes a JSON document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    Deck,
    Patch,
}

impl SchemaKind {
    /// Key of the envelope that wraps this kind of document
    pub fn envelope_key(self) -> &'static str {
        match self {
            SchemaKind::Deck => "deck",
            SchemaKind::Patch => "patch",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SchemaKind::Deck => "deck.schema.json",
            SchemaKind::Patch => "slide_patch.schema.json",
        }
    }

    fn bundled(self) -> &'static str {
        match self {
            SchemaKind::Deck => DECK_SCHEMA,
            SchemaKind::Patch => SLIDE_PATCH_SCHEMA,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Deck => write!(f, "DeckSpec"),
            SchemaKind::Patch => write!(f, "SlidePatch"),
        }
    }
}

/// Load the schema for `kind`, from `config.schema_dir` when set
pub fn load_schema(kind: SchemaKind, config: &Config) -> Result<Value> {
    let text = match &config.schema_dir {
        Some(dir) => {
            let path = dir.join(kind.file_name());
            debug!("Loading schema from {:?}", path);
            if !path.exists() {
                return Err(DeckError::PathNotFoundError(path));
            }
            fs::read_to_string(&path)?
        }
        None => kind.bundled().to_string(),
    };
    Ok(serde_json::from_str(&text)?)
}

/// Validate a canonical `{mode, deck|patch}` document against the schema for `kind`.
///
/// Every violation is logged; the first one becomes the returned error.
pub fn validate_against(kind: SchemaKind, instance: &Value, config: &Config) -> Result<()> {
    let schema = load_schema(kind, config)?;
    let validator = jsonschema::validator_for(&schema).map_err(|e| {
        DeckError::InvalidDocument(format!("{} is not a usable schema: {}", kind.file_name(), e))
    })?;

    let violations: Vec<(String, String)> = validator
        .iter_errors(instance)
        .map(|error| (display_path(&error.instance_path.to_string()), error.to_string()))
        .collect();

    for (path, message) in &violations {
        warn!("{} violation at {}: {}", kind, path, message);
    }

    match violations.into_iter().next() {
        Some((path, message)) => Err(DeckError::SchemaError { path, message }),
        None => Ok(()),
    }
}

/// Render a JSON pointer as `$.deck.slides[0].no`.
fn display_path(pointer: &str) -> String {
    let mut out = String::from("$");
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
            out.push_str(&format!("[{}]", segment));
        } else {
            out.push('.');
            out.push_str(&segment);
        }
    }
    out
}
