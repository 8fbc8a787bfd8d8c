// ABOUTME: Deck renderer for the slidev-deck tools
// ABOUTME: Writes every slide and asset, then regenerates the slides.md manifest

use crate::assets::write_assets;
use crate::errors::{DeckError, Result};
use crate::model::{headmatter_title, Deck, Mapping};
use crate::slide::{render_slide, to_yaml};
use crate::utils::{
    ensure_directory_exists, slide_filename, validate_project, MANIFEST_FILE, SLIDES_DIR,
};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Notice placed under the manifest title.
pub const GENERATED_NOTICE: &str =
    "> Auto-generated. Do not hand-edit if you are using the JSON pipeline.";

/// What rendering a deck wrote.
#[derive(Debug, Clone)]
pub struct DeckOutcome {
    pub slides: Vec<PathBuf>,
    pub assets: Vec<PathBuf>,
    pub manifest: PathBuf,
}

/// `src:` references for slides 1 through `max_no`, gaps included
pub fn manifest_sources(max_no: u32) -> Vec<String> {
    (1..=max_no)
        .map(|no| format!("./{}/{}", SLIDES_DIR, slide_filename(no)))
        .collect()
}

/// The `src:` references a deck's slides resolve to, ordered by slide number.
///
/// Unlike [`manifest_sources`] this honours `filename` overrides and skips gaps.
pub fn expected_sources(deck: &Deck) -> Vec<String> {
    let mut slides: Vec<_> = deck.slides.iter().collect();
    slides.sort_by_key(|s| s.no);
    slides
        .iter()
        .map(|s| format!("./{}/{}", SLIDES_DIR, s.target_filename()))
        .collect()
}

/// Render the manifest text for a deck's headmatter and highest slide number.
///
/// Every number from 1 to `max_no` gets an entry, whether or not that slide exists.
pub fn render_manifest(headmatter: &Mapping, max_no: u32) -> Result<String> {
    let mut lines: Vec<String> = vec!["---".to_string()];
    lines.push(if headmatter.is_empty() {
        String::new()
    } else {
        to_yaml(headmatter)?
    });
    lines.push("---".to_string());
    lines.push(String::new());
    lines.push(format!("# {}", headmatter_title(headmatter)));
    lines.push(String::new());
    lines.push(GENERATED_NOTICE.to_string());
    lines.push(String::new());

    for src in manifest_sources(max_no) {
        lines.push("---".to_string());
        lines.push(format!("src: {}", src));
        lines.push("---".to_string());
        lines.push(String::new());
    }

    Ok(format!("{}\n", lines.join("\n").trim_end()))
}

/// Render a full deck into a project, overwriting `slides.md`
pub fn render_deck(project: &Path, deck: &Deck) -> Result<DeckOutcome> {
    validate_project(project)?;
    if deck.slides.is_empty() {
        return Err(DeckError::InvalidDocument(
            "No slides found in deck".to_string(),
        ));
    }
    info!("Rendering {} slide(s) into {:?}", deck.slides.len(), project);

    let mut assets = Vec::new();
    for slide in &deck.slides {
        assets.extend(write_assets(project, &slide.assets)?);
    }

    let slides_dir = project.join(SLIDES_DIR);
    ensure_directory_exists(&slides_dir)?;

    let mut slides = Vec::with_capacity(deck.slides.len());
    for slide in &deck.slides {
        let path = slides_dir.join(slide.target_filename());
        let text = render_slide(
            &slide.frontmatter,
            &slide.content_md,
            slide.notes_md.as_deref(),
        )?;
        fs::write(&path, text)?;
        info!("Wrote {:?}", path);
        slides.push(path);
    }

    let manifest = project.join(MANIFEST_FILE);
    fs::write(&manifest, render_manifest(&deck.headmatter, deck.max_no())?)?;
    info!("Regenerated manifest {:?}", manifest);

    Ok(DeckOutcome {
        slides,
        assets,
        manifest,
    })
}

/// Parse a deck document (optionally `{deck: ...}` wrapped) and render it
pub fn render_deck_json(project: &Path, text: &str) -> Result<DeckOutcome> {
    let deck = Deck::from_json(text)?;
    render_deck(project, &deck)
}
