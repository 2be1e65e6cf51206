//! Implementation of `amgen clean`.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::Manifest;
use crate::util::fs::remove_dir_all_if_exists;

/// Remove the generated build tree.
///
/// Returns the removed directory, or `None` if there was nothing to remove.
pub fn clean(manifest: &Manifest) -> Result<Option<PathBuf>> {
    let build_dir = manifest.build_dir();
    if !build_dir.exists() {
        tracing::debug!("{} does not exist", build_dir.display());
        return Ok(None);
    }

    remove_dir_all_if_exists(&build_dir)?;
    tracing::info!("removed {}", build_dir.display());
    Ok(Some(build_dir))
}
