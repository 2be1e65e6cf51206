//! `Amgen.toml` manifest parsing.
//!
//! The manifest holds the project metadata, the build settings and the
//! option schema that the `KEY=VALUE` config file is resolved against:
//!
//! ```toml
//! [project]
//! name = "tbc"
//! version = "0.1"
//!
//! [build]
//! libs = ["pthread"]
//! defines = ["_GNU_SOURCE"]
//!
//! [[option]]
//! name = "DEBUG"
//! type = "bool"
//! default = 0
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::schema::{RawOption, Schema};

/// Manifest file name.
pub const MANIFEST_NAME: &str = "Amgen.toml";

/// Error locating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not find `Amgen.toml` in `{}` or any parent directory", .dir.display())]
    NotFound { dir: PathBuf },
}

/// Find `Amgen.toml`, searching `start` and then each parent directory.
pub fn find_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(ManifestError::NotFound {
                dir: start.to_path_buf(),
            });
        }
    }
}

/// Project metadata from the [project] section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Binary name; defaults to the project directory name
    #[serde(default)]
    pub name: Option<String>,

    /// Version passed to AC_INIT; defaults to "0.0"
    #[serde(default)]
    pub version: Option<String>,
}

/// Build settings from the [build] section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildSettings {
    /// `KEY=VALUE` config file, relative to the project root
    pub config: PathBuf,

    /// Static macro directory copied into `<build-dir>/m4`
    pub macro_dir: PathBuf,

    /// Generated build tree, relative to the project root
    pub build_dir: PathBuf,

    /// Libraries to check for and link against (without `-l`)
    pub libs: Vec<String>,

    /// Extra include directories (without `-I`)
    pub include_dirs: Vec<String>,

    /// Bare defines emitted ahead of the option defines
    pub defines: Vec<String>,

    /// Extra executables required on PATH
    pub tools: Vec<String>,

    /// Supported host platforms, in `uname -s` spelling
    pub platforms: Vec<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings {
            config: PathBuf::from("conf/build.cfg"),
            macro_dir: PathBuf::from("conf"),
            build_dir: PathBuf::from("build"),
            libs: Vec::new(),
            include_dirs: Vec::new(),
            defines: Vec::new(),
            tools: Vec::new(),
            platforms: vec!["Linux".to_string(), "Darwin".to_string()],
        }
    }
}

/// Raw manifest as deserialized from TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    project: ProjectMetadata,

    #[serde(default)]
    build: BuildSettings,

    #[serde(default)]
    option: Vec<RawOption>,
}

/// A parsed `Amgen.toml`.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub project: ProjectMetadata,

    pub build: BuildSettings,

    /// Option schema, in declaration order
    pub schema: Schema,

    /// The directory containing this manifest
    pub manifest_dir: PathBuf,
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawManifest = toml::from_str(content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let schema = Schema::from_raw(raw.option)?;
        // a bare `Amgen.toml` has an empty parent
        let manifest_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Manifest {
            project: raw.project,
            build: raw.build,
            schema,
            manifest_dir,
        })
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.manifest_dir
    }

    /// Path of the `KEY=VALUE` config file.
    pub fn config_path(&self) -> PathBuf {
        self.manifest_dir.join(&self.build.config)
    }

    /// Path of the static macro directory.
    pub fn macro_dir(&self) -> PathBuf {
        self.manifest_dir.join(&self.build.macro_dir)
    }

    /// Path of the generated build tree.
    pub fn build_dir(&self) -> PathBuf {
        self.manifest_dir.join(&self.build.build_dir)
    }
}
