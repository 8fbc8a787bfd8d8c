// ABOUTME: Slide patch applier for the slidev-deck tools
// ABOUTME: Writes one slide and its assets without touching the manifest or other slides

use crate::assets::write_assets;
use crate::errors::Result;
use crate::model::Slide;
use crate::slide::render_slide;
use crate::utils::{ensure_directory_exists, validate_project, SLIDES_DIR};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// What applying a patch wrote.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub no: u32,
    pub path: PathBuf,
    pub assets: Vec<PathBuf>,
}

/// Apply a single slide patch to a project
pub fn apply_patch(project: &Path, patch: &Slide) -> Result<PatchOutcome> {
    validate_project(project)?;
    info!("Applying patch for slide {} to {:?}", patch.no, project);

    let assets = write_assets(project, &patch.assets)?;

    let slides_dir = project.join(SLIDES_DIR);
    ensure_directory_exists(&slides_dir)?;
    let path = slides_dir.join(patch.target_filename());

    let text = render_slide(
        &patch.frontmatter,
        &patch.content_md,
        patch.notes_md.as_deref(),
    )?;
    fs::write(&path, text)?;
    info!("Patched slide {} -> {:?}", patch.no, path);

    Ok(PatchOutcome {
        no: patch.no,
        path,
        assets,
    })
}

/// Parse a patch document (optionally `{patch: ...}` wrapped) and apply it
pub fn apply_patch_json(project: &Path, text: &str) -> Result<PatchOutcome> {
    let patch = Slide::from_json(text)?;
    apply_patch(project, &patch)
}
