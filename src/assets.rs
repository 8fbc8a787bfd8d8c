// ABOUTME: Asset writer for the slidev-deck tools
// ABOUTME: Materializes base64, text and copy assets under the project root

use crate::errors::Result;
use crate::model::{Asset, AssetSource};
use crate::utils::ensure_parent_directory_exists;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Write one asset below `root`.
///
/// Parent directories are always created. Returns the written path, or `None`
/// when there was nothing to write: an empty base64 payload, or a copy source
/// that does not exist.
pub fn write_asset(root: &Path, asset: &Asset) -> Result<Option<PathBuf>> {
    let out = root.join(&asset.path);
    ensure_parent_directory_exists(&out)?;

    match &asset.source {
        AssetSource::Base64 { base64 } => {
            let payload: String = base64
                .as_deref()
                .unwrap_or_default()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if payload.is_empty() {
                warn!("Asset {} has no base64 payload, skipping", asset.path);
                return Ok(None);
            }
            let bytes = STANDARD.decode(payload.as_bytes())?;
            fs::write(&out, bytes)?;
        }
        AssetSource::Text { text } => {
            fs::write(&out, text.as_deref().unwrap_or_default())?;
        }
        AssetSource::Copy { from_path } => {
            let Some(from) = from_path.as_deref().filter(|p| !p.is_empty()) else {
                warn!("Copy asset {} has no from_path, skipping", asset.path);
                return Ok(None);
            };
            let src = root.join(from);
            if !src.is_file() {
                warn!("Copy source {:?} does not exist, skipping {}", src, asset.path);
                return Ok(None);
            }
            fs::copy(&src, &out)?;
        }
    }

    info!("Wrote asset {:?}", out);
    Ok(Some(out))
}

/// Write every asset in order, returning the paths actually written
pub fn write_assets(root: &Path, assets: &[Asset]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(assets.len());
    for asset in assets {
        if let Some(path) = write_asset(root, asset)? {
            written.push(path);
        }
    }
    Ok(written)
}
