// ABOUTME: Deck auditor for the slidev-deck tools
// ABOUTME: Cross-checks slides.md references against the slides directory and deck.json

use crate::deck::expected_sources;
use crate::errors::{DeckError, Result};
use crate::model::Deck;
use crate::utils::{MANIFEST_FILE, SLIDES_DIR};
use log::{debug, info, warn};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Deck document looked up at the project root when none is given.
pub const DEFAULT_DECK_DOCUMENT: &str = "deck.json";

/// Findings of an audit. Issues fail the audit, warnings do not.
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub references: Vec<String>,
}

impl AuditReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

fn src_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"src:\s+(\S+)").expect("valid src pattern"))
}

/// Every `src:` reference in manifest text, in order
pub fn extract_sources(manifest: &str) -> Vec<String> {
    src_pattern()
        .captures_iter(manifest)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Slide files present in `slides/`, as `./slides/<name>` references
fn present_slides(project: &Path) -> Result<Vec<String>> {
    let slides_dir = project.join(SLIDES_DIR);
    if !slides_dir.is_dir() {
        return Ok(Vec::new());
    }
    let pattern = format!(
        "{}/*.md",
        glob::Pattern::escape(&slides_dir.to_string_lossy())
    );
    let entries = glob::glob(&pattern)
        .map_err(|e| DeckError::UnknownError(format!("Invalid glob pattern: {}", e)))?;

    let mut present = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if let Some(name) = path.file_name() {
                    present.push(format!("./{}/{}", SLIDES_DIR, name.to_string_lossy()));
                }
            }
            Err(e) => warn!("Could not read slide entry {:?}: {}", e.path(), e.error()),
        }
    }
    present.sort();
    Ok(present)
}

/// Compare the manifest order against the deck document, if there is one
fn check_deck_order(deck_path: &Path, references: &[String], report: &mut AuditReport) {
    let text = match fs::read_to_string(deck_path) {
        Ok(text) => text,
        Err(e) => {
            report.warnings.push(format!(
                "Could not read {} for comparison: {}",
                deck_path.display(),
                e
            ));
            return;
        }
    };
    match Deck::from_json(&text) {
        Ok(deck) => {
            let expected = expected_sources(&deck);
            debug!("Expected order from {:?}: {:?}", deck_path, expected);
            if !expected.is_empty() && !references.is_empty() && expected != references {
                report.warnings.push(format!(
                    "{} order differs from {} (expected src list does not match).",
                    MANIFEST_FILE,
                    deck_path.display()
                ));
            }
        }
        Err(e) => report.warnings.push(format!(
            "Could not parse {} for comparison: {}",
            deck_path.display(),
            e
        )),
    }
}

/// Audit a project's manifest.
///
/// `deck_path` overrides the default `deck.json` used for the order check; an
/// explicit path that does not exist is reported as a warning.
pub fn audit_project(project: &Path, deck_path: Option<&Path>) -> Result<AuditReport> {
    if !project.exists() {
        return Err(DeckError::PathNotFoundError(project.to_path_buf()));
    }
    info!("Auditing {:?}", project);

    let mut report = AuditReport::default();
    let manifest = project.join(MANIFEST_FILE);
    if !manifest.is_file() {
        report.issues.push(format!("Missing {}", MANIFEST_FILE));
        return Ok(report);
    }

    let references = extract_sources(&fs::read_to_string(&manifest)?);
    if references.is_empty() {
        report.issues.push(format!(
            "No 'src:' slide references found in {}",
            MANIFEST_FILE
        ));
    }

    let mut seen = HashSet::new();
    for reference in &references {
        if !seen.insert(reference.as_str()) {
            report.warnings.push(format!(
                "Duplicate reference in {}: {}",
                MANIFEST_FILE, reference
            ));
        }
        if !project.join(reference).exists() {
            report.issues.push(format!(
                "broken link in {}: {}",
                MANIFEST_FILE, reference
            ));
        }
    }

    let unreferenced: Vec<String> = present_slides(project)?
        .into_iter()
        .filter(|slide| !seen.contains(slide.as_str()))
        .collect();
    if !unreferenced.is_empty() {
        report.warnings.push(format!(
            "Unreferenced slide files in ./{}/: {}",
            SLIDES_DIR,
            unreferenced.join(", ")
        ));
    }

    let deck_document: Option<PathBuf> = match deck_path {
        Some(path) if path.exists() => Some(path.to_path_buf()),
        Some(path) => {
            report.warnings.push(format!(
                "Deck document not found: {}",
                path.display()
            ));
            None
        }
        None => Some(project.join(DEFAULT_DECK_DOCUMENT)).filter(|p| p.exists()),
    };
    if let Some(path) = deck_document {
        check_deck_order(&path, &references, &mut report);
    }

    report.references = references;
    Ok(report)
}
