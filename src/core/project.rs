//! Per-run project information.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default project version when the manifest does not set one.
pub const DEFAULT_VERSION: &str = "0.0";

/// A required executable found on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    /// Resolved location on `PATH`
    pub path: PathBuf,

    /// Reported version, for tools whose version is queried
    pub version: Option<String>,
}

/// Project name, version and discovered host facts.
///
/// Created empty, filled in by [`crate::builder::toolchain::validate`] and
/// consumed once by descriptor generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,

    /// Host platform in `uname -s` spelling (`Linux`, `Darwin`, ...)
    pub platform: String,

    pub tools: BTreeMap<String, ToolInfo>,
}

impl ProjectInfo {
    /// Version reported by a queried tool.
    pub fn tool_version(&self, tool: &str) -> Option<&str> {
        self.tools.get(tool).and_then(|t| t.version.as_deref())
    }

    pub fn is_linux(&self) -> bool {
        self.platform.eq_ignore_ascii_case("Linux")
    }
}
