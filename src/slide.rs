// ABOUTME: Slide markdown rendering and parsing
// ABOUTME: Turns frontmatter, body and speaker notes into the on-disk slide text and back

use crate::errors::{DeckError, Result};
use crate::model::Mapping;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const DELIMITER: &str = "---";
const NOTES_OPEN: &str = "<!--";
const NOTES_CLOSE: &str = "-->";
const TIMESTAMP_TOKEN: &str = "__slidev_deck_timestamp_";

/// The structured pieces of a slide file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSlide {
    pub frontmatter: Mapping,
    pub content_md: String,
    pub notes_md: Option<String>,
}

/// YAML 1.1 timestamps, which Slidev's loader turns into dates when unquoted.
fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\d{4}-\d{1,2}-\d{1,2}(([Tt]|[ \t]+)\d{1,2}:\d{2}:\d{2}(\.\d*)?([ \t]*(Z|[-+]\d{1,2}(:\d{2})?))?)?$",
        )
        .expect("valid timestamp pattern")
    })
}

fn shield_text(text: &str, shielded: &mut Vec<String>) -> String {
    if timestamp_pattern().is_match(text) {
        shielded.push(text.to_string());
        format!("{}{}__", TIMESTAMP_TOKEN, shielded.len() - 1)
    } else {
        text.to_string()
    }
}

/// Swap timestamp-like strings for plain tokens that serde_yaml leaves unquoted
fn shield_timestamps(value: &Value, shielded: &mut Vec<String>) -> Value {
    match value {
        Value::String(text) => Value::String(shield_text(text, shielded)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| shield_timestamps(item, shielded))
                .collect(),
        ),
        Value::Object(map) => Value::Object(shield_mapping(map, shielded)),
        other => other.clone(),
    }
}

fn shield_mapping(mapping: &Mapping, shielded: &mut Vec<String>) -> Mapping {
    mapping
        .iter()
        .map(|(key, value)| {
            let key = shield_text(key, shielded);
            (key, shield_timestamps(value, shielded))
        })
        .collect()
}

/// Serialize a mapping as block-style YAML, keeping key order.
///
/// Strings that look like dates are single-quoted so they stay strings.
pub fn to_yaml(mapping: &Mapping) -> Result<String> {
    let mut shielded = Vec::new();
    let mapping = shield_mapping(mapping, &mut shielded);
    let mut yaml = serde_yaml::to_string(&mapping)?;
    for (index, original) in shielded.iter().enumerate() {
        yaml = yaml.replace(
            &format!("{}{}__", TIMESTAMP_TOKEN, index),
            &format!("'{}'", original),
        );
    }
    Ok(yaml.trim().to_string())
}

/// Render a slide to the markdown stored under `slides/`.
///
/// The frontmatter block is always delimited, even when empty. Notes that are
/// absent or blank produce no comment block. The output ends with exactly one newline.
pub fn render_slide(
    frontmatter: &Mapping,
    content_md: &str,
    notes_md: Option<&str>,
) -> Result<String> {
    let mut parts: Vec<String> = vec![DELIMITER.to_string()];
    if !frontmatter.is_empty() {
        parts.push(to_yaml(frontmatter)?);
    }
    parts.push(DELIMITER.to_string());
    parts.push(format!("{}\n", content_md.trim()));

    if let Some(notes) = notes_md.map(str::trim).filter(|n| !n.is_empty()) {
        parts.push(NOTES_OPEN.to_string());
        parts.push(notes.to_string());
        parts.push(NOTES_CLOSE.to_string());
    }

    Ok(format!("{}\n", parts.join("\n").trim()))
}

/// Split a leading `---` delimited block off the text.
fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let after = text.strip_prefix("---\n")?;
    let mut offset = 0;
    for line in after.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&after[..offset], &after[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Split a trailing `<!-- ... -->` block off the text.
///
/// Only a block separated from the body by a blank line (or opening the text)
/// counts as notes; a comment that ends the body itself stays in the body.
fn split_notes(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim_end();
    if let Some(inner) = trimmed.strip_suffix("\n-->") {
        if let Some(idx) = inner.rfind("<!--\n") {
            if idx == 0 || inner[..idx].ends_with("\n\n") {
                return (&inner[..idx], Some(&inner[idx + NOTES_OPEN.len() + 1..]));
            }
        }
    }
    (trimmed, None)
}

/// Parse a slide file back into frontmatter, body and notes.
///
/// Text without a leading delimiter is treated as body only.
pub fn parse_slide(text: &str) -> Result<ParsedSlide> {
    let text = text.replace("\r\n", "\n");

    let (yaml, rest) = split_frontmatter(&text).unwrap_or(("", text.as_str()));
    let frontmatter = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Object(map) => map,
            Value::Null => Mapping::new(),
            other => {
                return Err(DeckError::InvalidDocument(format!(
                    "slide frontmatter must be a mapping, found: {}",
                    other
                )))
            }
        }
    };

    let (body, notes) = split_notes(rest);
    Ok(ParsedSlide {
        frontmatter,
        content_md: body.trim().to_string(),
        notes_md: notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    })
}

impl ParsedSlide {
    /// Render these pieces back to slide text
    pub fn render(&self) -> Result<String> {
        render_slide(&self.frontmatter, &self.content_md, self.notes_md.as_deref())
    }
}

fn collect_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.descendants() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::Code(code) => out.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => {}
        }
    }
}

/// Text of the first level-1 heading in a markdown body
pub fn slide_title(markdown: &str) -> Option<String> {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &ComrakOptions::default());

    for node in root.descendants() {
        let is_title = matches!(
            node.data.borrow().value,
            NodeValue::Heading(ref heading) if heading.level == 1
        );
        if is_title {
            let mut title = String::new();
            collect_text(node, &mut title);
            let title = title.trim().to_string();
            if !title.is_empty() {
                return Some(title);
            }
        }
    }
    None
}
