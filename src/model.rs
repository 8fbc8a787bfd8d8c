// ABOUTME: Data model for decks, slide patches and assets
// ABOUTME: Deserializes input JSON, including the optional {mode, deck|patch} envelope

use crate::errors::{DeckError, Result};
use crate::utils::slide_filename;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Ordered YAML-ready mapping used for headmatter and frontmatter.
pub type Mapping = Map<String, Value>;

/// Title used for the manifest heading when the headmatter has none.
pub const DEFAULT_DECK_TITLE: &str = "Slidev Deck";

/// Where an asset's bytes come from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssetSource {
    /// Inline binary content, base64 encoded.
    Base64 {
        #[serde(default)]
        base64: Option<String>,
    },
    /// Inline text content, written as is.
    Text {
        #[serde(default)]
        text: Option<String>,
    },
    /// An existing file under the project root.
    Copy {
        #[serde(default)]
        from_path: Option<String>,
    },
}

/// A non-markdown file materialized into the project tree.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Asset {
    /// Destination relative to the project root
    pub path: String,
    #[serde(flatten)]
    pub source: AssetSource,
}

/// A single slide. A slide patch has exactly the same shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Slide {
    pub no: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub frontmatter: Mapping,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_md: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_md: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub assets: Vec<Asset>,
}

/// A full presentation: shared headmatter plus every slide.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Deck {
    #[serde(default, deserialize_with = "null_as_default")]
    pub headmatter: Mapping,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slides: Vec<Slide>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `headmatter.title` as display text, or the default deck title.
pub fn headmatter_title(headmatter: &Mapping) -> String {
    match headmatter.get("title") {
        Some(Value::String(title)) => title.clone(),
        Some(Value::Null) | None => DEFAULT_DECK_TITLE.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Take `value[key]` when the document is wrapped in an envelope, else the document itself.
pub fn unwrap_envelope(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    }
}

impl Slide {
    /// Parse a slide patch from JSON text, accepting the `{patch: ...}` envelope
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Parse a slide patch from a JSON value, accepting the `{patch: ...}` envelope
    pub fn from_value(value: Value) -> Result<Self> {
        let slide: Slide = serde_json::from_value(unwrap_envelope(value, "patch"))?;
        slide.check()?;
        Ok(slide)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.no == 0 {
            return Err(DeckError::InvalidDocument(
                "slide numbers start at 1".to_string(),
            ));
        }
        Ok(())
    }

    /// File name under `slides/`: the explicit override, or `NNN.md` from the number.
    pub fn target_filename(&self) -> String {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => slide_filename(self.no),
        }
    }
}

impl Deck {
    /// Parse a deck from JSON text, accepting the `{deck: ...}` envelope
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Parse a deck from a JSON value, accepting the `{deck: ...}` envelope
    pub fn from_value(value: Value) -> Result<Self> {
        let deck: Deck = serde_json::from_value(unwrap_envelope(value, "deck"))?;
        let mut seen = HashSet::new();
        for slide in &deck.slides {
            slide.check()?;
            if !seen.insert(slide.no) {
                return Err(DeckError::InvalidDocument(format!(
                    "slide number {} appears more than once",
                    slide.no
                )));
            }
        }
        Ok(deck)
    }

    /// Heading text for the manifest, taken from `headmatter.title`.
    pub fn title(&self) -> String {
        headmatter_title(&self.headmatter)
    }

    /// Highest slide number in the deck, 0 when there are no slides.
    pub fn max_no(&self) -> u32 {
        self.slides.iter().map(|s| s.no).max().unwrap_or(0)
    }
}
