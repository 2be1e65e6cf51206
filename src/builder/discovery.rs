//! Source discovery in the generated build tree.
//!
//! Entries are reported in the order the filesystem lists them. The main
//! program tree is scanned shallow; library subdirectories are scanned deep.

use std::path::{Component, Path};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

/// Suffix of compilable source files.
pub const SOURCE_SUFFIX: &str = ".c";

/// Ordered relative paths of discovered source files.
pub type SourceFileSet = Vec<String>;

/// A source subdirectory built as its own static library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryUnit {
    /// Directory name under `src/`
    pub name: String,

    /// Sources at every depth, relative to the build tree
    pub sources: SourceFileSet,
}

impl LibraryUnit {
    /// Archive file name, e.g. `libnet.a`.
    pub fn archive(&self) -> String {
        format!("lib{}.a", self.name)
    }

    /// Include flag for the unit's directory.
    pub fn include_flag(&self) -> String {
        format!("-I./src/{}", self.name)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Collect `.c` files under `base/dirname`, as paths relative to `base`.
///
/// Subdirectories are only entered when `recursive` is set, and hidden
/// directories are never entered.
pub fn discover(base: &Path, dirname: &str, recursive: bool) -> Result<SourceFileSet> {
    let root = base.join(dirname);
    let mut walker = WalkDir::new(&root).min_depth(1).follow_links(true);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    let entries = walker
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && is_hidden(e)));

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to scan directory: {}", root.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(SOURCE_SUFFIX) {
            files.push(relative_source_path(base, entry.path()));
        }
    }

    Ok(files)
}

/// `/`-joined path of `path` relative to `base`.
fn relative_source_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Names of the non-hidden immediate subdirectories of `src_dir`.
pub fn library_units(src_dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(src_dir)
        .with_context(|| format!("failed to read directory: {}", src_dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.path().is_dir() {
            names.push(name);
        }
    }
    Ok(names)
}

/// Discover the sources of every library unit under `base/src`.
pub fn discover_units(base: &Path) -> Result<Vec<LibraryUnit>> {
    library_units(&base.join("src"))?
        .into_iter()
        .map(|name| {
            let sources = discover(base, &format!("src/{}", name), true)?;
            Ok(LibraryUnit { name, sources })
        })
        .collect()
}
