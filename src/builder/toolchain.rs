//! Host platform and autotools validation.
//!
//! Checks that the host is a supported platform, that every required
//! executable resolves on `PATH`, and reads the autoconf version that
//! `configure.ac` declares as its prerequisite.

use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use crate::core::project::{ProjectInfo, ToolInfo, DEFAULT_VERSION};
use crate::core::Manifest;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::process::{find_executable, ProcessBuilder};

/// Executables every bootstrap needs, in check order.
pub const REQUIRED_TOOLS: &[&str] =
    &["aclocal", "autoconf", "autoheader", "automake", "autoreconf"];

/// Tool whose version becomes the `AC_PREREQ` of `configure.ac`.
pub const VERSION_TOOL: &str = "autoconf";

/// Error in the host environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("{platform} is not supported")]
    UnsupportedPlatform {
        platform: String,
        supported: Vec<String>,
    },

    #[error("cannot find `{tool}`")]
    MissingTool { tool: String },

    #[error("cannot get the version of `{tool}`")]
    ToolVersion { tool: String },
}

impl EnvError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            EnvError::UnsupportedPlatform { supported, .. } => diag
                .with_context(format!("supported platforms: {}", supported.join(", ")))
                .with_suggestion("Add the platform to `platforms` in the [build] section"),
            EnvError::MissingTool { tool } => diag
                .with_context(format!("`{}` was not found on PATH", tool))
                .with_suggestion(suggestions::INSTALL_AUTOTOOLS),
            EnvError::ToolVersion { tool } => diag
                .with_context(format!("`{} --version` printed no version", tool))
                .with_suggestion(suggestions::INSTALL_AUTOTOOLS),
        }
    }
}

/// Host introspection used by [`validate`].
pub trait Host {
    /// Platform in `uname -s` spelling.
    fn platform(&self) -> String;

    /// Resolve an executable on `PATH`.
    fn find_tool(&self, name: &str) -> Option<PathBuf>;

    /// Output of `<tool> --version`.
    fn version_output(&self, tool: &Path) -> Result<String>;
}

/// The machine amgen is running on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn platform(&self) -> String {
        host_platform().to_string()
    }

    fn find_tool(&self, name: &str) -> Option<PathBuf> {
        find_executable(name)
    }

    fn version_output(&self, tool: &Path) -> Result<String> {
        let output = ProcessBuilder::new(tool).arg("--version").exec_and_check()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Map the compile-time OS name to its `uname -s` spelling.
pub fn host_platform() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "netbsd" => "NetBSD",
        "openbsd" => "OpenBSD",
        "dragonfly" => "DragonFly",
        "solaris" | "illumos" => "SunOS",
        other => other,
    }
}

/// Check `platform` against the supported set (case-insensitive).
pub fn check_platform(platform: &str, supported: &[String]) -> Result<(), EnvError> {
    if supported.iter().any(|p| p.eq_ignore_ascii_case(platform)) {
        Ok(())
    } else {
        Err(EnvError::UnsupportedPlatform {
            platform: platform.to_string(),
            supported: supported.to_vec(),
        })
    }
}

/// Extra tools followed by the baseline autotools, without duplicates.
pub fn required_tools(extra: &[String]) -> Vec<String> {
    let mut tools: Vec<String> = Vec::new();
    let all = extra
        .iter()
        .map(String::as_str)
        .chain(REQUIRED_TOOLS.iter().copied());
    for tool in all {
        if !tools.iter().any(|t| t == tool) {
            tools.push(tool.to_string());
        }
    }
    tools
}

/// Last whitespace-delimited token of the first line.
pub fn parse_version(output: &str) -> Option<String> {
    output
        .lines()
        .next()?
        .split_whitespace()
        .last()
        .map(str::to_string)
}

/// Validate the host and collect project information.
///
/// Fails on an unsupported platform, a missing tool or an unreadable
/// autoconf version. Project name and version fall back to the project
/// directory name and `0.0`.
pub fn validate(host: &dyn Host, manifest: &Manifest) -> Result<ProjectInfo> {
    let platform = host.platform();
    check_platform(&platform, &manifest.build.platforms)?;
    tracing::debug!("host platform: {}", platform);

    let mut project = ProjectInfo {
        platform,
        ..ProjectInfo::default()
    };

    for tool in required_tools(&manifest.build.tools) {
        let path = host
            .find_tool(&tool)
            .ok_or_else(|| EnvError::MissingTool { tool: tool.clone() })?;
        tracing::debug!("found {} at {}", tool, path.display());
        project.tools.insert(
            tool,
            ToolInfo {
                path,
                version: None,
            },
        );
    }

    let version = match project.tools.get_mut(VERSION_TOOL) {
        Some(info) => {
            let version = host
                .version_output(&info.path)
                .ok()
                .and_then(|out| parse_version(&out))
                .ok_or_else(|| EnvError::ToolVersion {
                    tool: VERSION_TOOL.to_string(),
                })?;
            info.version = Some(version.clone());
            version
        }
        None => {
            return Err(EnvError::MissingTool {
                tool: VERSION_TOOL.to_string(),
            }
            .into())
        }
    };
    tracing::info!("using {} {}", VERSION_TOOL, version);

    project.name = manifest
        .project
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| dir_name(manifest.root()));
    project.version = manifest
        .project
        .version
        .clone()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_VERSION.to_string());

    Ok(project)
}

fn dir_name(root: &Path) -> String {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeHost;

    fn manifest(content: &str, dir: &Path) -> Manifest {
        Manifest::parse(content, &dir.join("Amgen.toml")).unwrap()
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(
            parse_version("autoconf (GNU Autoconf) 2.71\nCopyright (C) 2021\n").as_deref(),
            Some("2.71")
        );
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("\nsecond line 1.0"), None);
    }

    #[test]
    fn test_required_tools_dedup_keeps_order() {
        let tools = required_tools(&["make".to_string(), "autoconf".to_string()]);
        assert_eq!(
            tools,
            ["make", "autoconf", "aclocal", "autoheader", "automake", "autoreconf"]
        );
    }

    #[test]
    fn test_check_platform_case_insensitive() {
        let supported = vec!["Linux".to_string(), "Darwin".to_string()];
        assert!(check_platform("linux", &supported).is_ok());
        assert_eq!(
            check_platform("Windows", &supported).unwrap_err(),
            EnvError::UnsupportedPlatform {
                platform: "Windows".to_string(),
                supported
            }
        );
    }

    #[test]
    fn test_validate_collects_project_info() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path().join("tbc");
        std::fs::create_dir_all(&root).unwrap();
        let manifest = manifest("", &root);

        let project = validate(&FakeHost::linux(), &manifest).unwrap();

        assert_eq!(project.name, "tbc");
        assert_eq!(project.version, "0.0");
        assert_eq!(project.platform, "Linux");
        assert_eq!(project.tool_version("autoconf"), Some("2.71"));
        assert_eq!(project.tools.len(), REQUIRED_TOOLS.len());
        assert!(project.is_linux());
    }

    #[test]
    fn test_bare_manifest_path_names_project_after_cwd() {
        let manifest = Manifest::parse("", Path::new("Amgen.toml")).unwrap();
        let cwd = std::env::current_dir().unwrap().canonicalize().unwrap();

        let project = validate(&FakeHost::linux(), &manifest).unwrap();
        assert!(!project.name.is_empty());
        assert_eq!(project.name, cwd.file_name().unwrap().to_string_lossy());
    }

    #[test]
    fn test_validate_uses_manifest_metadata() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = manifest("[project]\nname = \"app\"\nversion = \"1.2\"\n", tmp.path());

        let project = validate(&FakeHost::linux(), &manifest).unwrap();
        assert_eq!(project.name, "app");
        assert_eq!(project.version, "1.2");
    }

    #[test]
    fn test_validate_unsupported_platform() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = manifest("", tmp.path());

        let err = validate(&FakeHost::linux().with_platform("Plan9"), &manifest).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EnvError>(),
            Some(EnvError::UnsupportedPlatform { platform, .. }) if platform == "Plan9"
        ));
    }

    #[test]
    fn test_validate_missing_tool() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = manifest("[build]\ntools = [\"make\"]\n", tmp.path());

        let err = validate(&FakeHost::linux().without_tool("make"), &manifest).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EnvError>(),
            Some(&EnvError::MissingTool {
                tool: "make".to_string()
            })
        );
    }

    #[test]
    fn test_validate_unparsable_version() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = manifest("", tmp.path());

        let err = validate(&FakeHost::linux().with_version_output(""), &manifest).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EnvError>(),
            Some(&EnvError::ToolVersion {
                tool: "autoconf".to_string()
            })
        );
    }
}
