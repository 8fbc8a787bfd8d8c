// ABOUTME: Document shape detection, normalization and schema validation
// ABOUTME: Wraps raw decks and patches into the canonical {mode, deck|patch} form

use crate::config::Config;
use crate::errors::{DeckError, Result};
use crate::model::{Deck, Slide};
use crate::schema::{validate_against, SchemaKind};
use log::{debug, info};
use serde_json::{Map, Value};

/// Mode every generated document is expected to carry.
pub const BUILD_MODE: &str = "build";

const RAW_DECK_KEYS: [&str; 2] = ["headmatter", "slides"];
const RAW_PATCH_KEYS: [&str; 3] = ["no", "frontmatter", "content_md"];

/// A document in canonical envelope form, plus the warnings produced getting it there.
#[derive(Debug, Clone)]
pub struct NormalizedDocument {
    pub kind: SchemaKind,
    pub envelope: Value,
    pub warnings: Vec<String>,
}

/// A validated, typed document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Deck(Deck),
    Patch(Slide),
}

fn has_keys(map: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().all(|key| map.contains_key(*key))
}

/// Work out which schema a document belongs to from the keys it carries.
pub fn infer_kind(value: &Value) -> Option<SchemaKind> {
    let map = value.as_object()?;
    if map.contains_key("deck") {
        Some(SchemaKind::Deck)
    } else if map.contains_key("patch") {
        Some(SchemaKind::Patch)
    } else if has_keys(map, &RAW_DECK_KEYS) {
        Some(SchemaKind::Deck)
    } else if has_keys(map, &RAW_PATCH_KEYS) {
        Some(SchemaKind::Patch)
    } else {
        None
    }
}

/// Bring a document into `{mode, deck|patch}` form.
///
/// `selector` forces the schema; without it the kind is inferred and a document
/// matching neither shape is a usage error.
pub fn normalize(value: Value, selector: Option<SchemaKind>) -> Result<NormalizedDocument> {
    let kind = match selector.or_else(|| infer_kind(&value)) {
        Some(kind) => kind,
        None => {
            return Err(DeckError::UsageError(
                "JSON must contain a 'deck' or 'patch' root key, or specify --schema".to_string(),
            ))
        }
    };
    let key = kind.envelope_key();
    let mut warnings = Vec::new();

    let envelope = match value {
        Value::Object(mut map) if map.contains_key(key) => {
            match map.get("mode") {
                None => {
                    map.insert("mode".to_string(), Value::String(BUILD_MODE.to_string()));
                    warnings.push(format!("'mode' is missing; defaulted to '{}'.", BUILD_MODE));
                }
                Some(Value::String(mode)) if mode == BUILD_MODE => {}
                Some(_) => {
                    warnings.push(format!(
                        "'mode' should be '{}' for strict output.",
                        BUILD_MODE
                    ));
                }
            }
            Value::Object(map)
        }
        raw => {
            warnings.push(format!(
                "Document has no '{}' wrapper; treated it as {{\"mode\": \"{}\", \"{}\": ...}}.",
                key, BUILD_MODE, key
            ));
            let mut map = Map::new();
            map.insert("mode".to_string(), Value::String(BUILD_MODE.to_string()));
            map.insert(key.to_string(), raw);
            Value::Object(map)
        }
    };

    debug!("Normalized document as {} with {} warning(s)", kind, warnings.len());
    Ok(NormalizedDocument {
        kind,
        envelope,
        warnings,
    })
}

/// Normalize a document and validate it against its schema
pub fn validate_document(
    value: Value,
    selector: Option<SchemaKind>,
    config: &Config,
) -> Result<NormalizedDocument> {
    let normalized = normalize(value, selector)?;
    info!("Validating against {}", normalized.kind);
    validate_against(normalized.kind, &normalized.envelope, config)?;
    Ok(normalized)
}

/// Parse JSON text, then normalize and validate it
pub fn validate_json(
    text: &str,
    selector: Option<SchemaKind>,
    config: &Config,
) -> Result<NormalizedDocument> {
    let value: Value = serde_json::from_str(text)?;
    validate_document(value, selector, config)
}

impl NormalizedDocument {
    /// Convert the canonical envelope into the typed deck or patch it wraps
    pub fn into_document(self) -> Result<Document> {
        match self.kind {
            SchemaKind::Deck => Ok(Document::Deck(Deck::from_value(self.envelope)?)),
            SchemaKind::Patch => Ok(Document::Patch(Slide::from_value(self.envelope)?)),
        }
    }
}
