//! Project fixtures written to temporary directories.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::manifest::MANIFEST_NAME;
use crate::core::Manifest;

/// Contents given to source files added with [`ProjectFixture::with_source`].
pub const MINIMAL_C_SOURCE: &str = "int placeholder(void) { return 0; }\n";

/// A project laid out on disk: `Amgen.toml`, a config file and sources.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Project directory name inside the temp dir
    pub name: String,
    /// Amgen.toml content
    pub manifest: String,
    /// Files relative to the project root, in insertion order
    pub files: Vec<(PathBuf, String)>,
}

impl ProjectFixture {
    /// Create an empty project fixture.
    pub fn new(name: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            manifest: String::new(),
            files: Vec::new(),
        }
    }

    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Write `conf/build.cfg`.
    pub fn with_config(self, config: impl Into<String>) -> Self {
        self.with_file("conf/build.cfg", config)
    }

    /// Add a source file with placeholder contents.
    pub fn with_source(self, path: impl AsRef<Path>) -> Self {
        self.with_file(path, MINIMAL_C_SOURCE)
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.files
            .push((path.as_ref().to_path_buf(), content.into()));
        self
    }

    /// Write the project into `dir/<name>` and return the project root.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let root = dir.join(&self.name);
        std::fs::create_dir_all(&root)?;
        std::fs::write(root.join(MANIFEST_NAME), &self.manifest)?;

        for (rel, content) in &self.files {
            let path = root.join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        Ok(root)
    }

    /// Write the project into a fresh temp dir and load its manifest.
    ///
    /// Panics on failure; only for use in tests.
    pub fn load(&self) -> (TempDir, Manifest) {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let root = self.write_to(tmp.path()).expect("failed to write fixture");
        let manifest =
            Manifest::load(&root.join(MANIFEST_NAME)).expect("failed to load fixture manifest");
        (tmp, manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let (tmp, manifest) = ProjectFixture::new("demo")
            .with_manifest("[project]\nname = \"demo\"\n")
            .with_config("DEBUG=1\n")
            .with_source("src/main.c")
            .load();

        let root = tmp.path().join("demo");
        assert_eq!(manifest.root(), root.as_path());
        assert_eq!(
            std::fs::read_to_string(manifest.config_path()).unwrap(),
            "DEBUG=1\n"
        );
        assert!(root.join("src/main.c").is_file());
    }
}
