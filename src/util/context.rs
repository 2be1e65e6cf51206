//! Global context for amgen operations.
//!
//! Provides centralized access to the working directory and manifest lookup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::{find_manifest, ManifestError};
use crate::core::Manifest;

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Explicit manifest path from `--manifest-path`
    manifest_path: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            manifest_path: None,
        }
    }

    /// Use an explicit manifest instead of searching for one.
    pub fn with_manifest_path(mut self, path: Option<PathBuf>) -> Self {
        self.manifest_path = path.map(|p| self.cwd.join(p));
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Find `Amgen.toml`: the explicit path if given, else search upward
    /// from the working directory.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        match self.manifest_path {
            Some(ref path) if path.is_file() => Ok(path.clone()),
            Some(ref path) => Err(ManifestError::NotFound {
                dir: path.parent().unwrap_or(self.cwd.as_path()).to_path_buf(),
            }),
            None => find_manifest(&self.cwd),
        }
    }

    /// Find and load the manifest.
    pub fn load_manifest(&self) -> Result<Manifest> {
        let path = self.find_manifest()?;
        tracing::debug!("using manifest {}", path.display());
        Manifest::load(&path)
    }
}
