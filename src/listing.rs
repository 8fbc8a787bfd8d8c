// ABOUTME: Read-only views of a project's slides
// ABOUTME: Lists slide files with their titles and reads a single slide by number

use crate::errors::{DeckError, Result};
use crate::slide::{parse_slide, slide_title};
use crate::utils::{slide_filename, validate_project, SLIDES_DIR};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder shown for slides without a level-1 heading.
pub const NO_TITLE: &str = "(No title)";

/// One slide file found under `slides/`.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideEntry {
    /// Number parsed from the file stem, -1 when the stem is not numeric
    pub no: i64,
    pub file_name: String,
    pub path: PathBuf,
    pub title: Option<String>,
}

/// A slide file's raw text.
#[derive(Debug, Clone)]
pub struct SlideText {
    pub no: u32,
    pub file_name: String,
    pub path: PathBuf,
    pub content: String,
}

/// Title of a slide file: the first level-1 heading of its body
pub fn title_of(content: &str) -> Option<String> {
    match parse_slide(content) {
        Ok(parsed) => slide_title(&parsed.content_md),
        Err(e) => {
            debug!("Could not split frontmatter ({}), reading whole file", e);
            slide_title(content)
        }
    }
}

/// List the markdown files in `slides/`, sorted by name.
///
/// Returns `None` when the project has no slides directory.
pub fn list_slides(project: &Path) -> Result<Option<Vec<SlideEntry>>> {
    let slides_dir = project.join(SLIDES_DIR);
    if !slides_dir.is_dir() {
        return Ok(None);
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(&slides_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().map_or(false, |ext| ext == "md"))
        .collect();
    paths.sort();

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path)?;
        let no = path
            .file_stem()
            .and_then(|stem| stem.to_string_lossy().parse::<i64>().ok())
            .unwrap_or(-1);
        entries.push(SlideEntry {
            no,
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            title: title_of(&content),
            path,
        });
    }
    Ok(Some(entries))
}

/// Read `slides/NNN.md` from a project
pub fn read_slide(project: &Path, no: u32) -> Result<SlideText> {
    validate_project(project)?;
    let file_name = slide_filename(no);
    let path = project.join(SLIDES_DIR).join(&file_name);
    if !path.is_file() {
        return Err(DeckError::SlideNotFound {
            no,
            filename: file_name,
        });
    }
    let content = fs::read_to_string(&path)?;
    Ok(SlideText {
        no,
        file_name,
        path,
        content,
    })
}
