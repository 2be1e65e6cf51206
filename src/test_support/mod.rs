//! Test utilities and mocks for amgen unit tests.
//!
//! Provides fakes for the two seams that touch the outside world: the
//! [`Host`] consulted during validation and the [`CommandRunner`] that runs
//! the autotools chain.
//!
//! # Example
//!
//! ```rust,ignore
//! use amgen::test_support::{FakeHost, MockRunner, ProjectFixture};
//!
//! #[test]
//! fn test_example() {
//!     let (_tmp, manifest) = ProjectFixture::new("app").with_manifest("").load();
//!     let runner = MockRunner::new().fail("automake", 1);
//!     Pipeline::new(&runner, &FakeHost::linux()).run(&manifest, Stage::Done)?;
//!     assert_eq!(runner.commands().len(), 8);
//! }
//! ```

pub mod fixtures;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;

use crate::builder::toolchain::{Host, REQUIRED_TOOLS};
use crate::util::process::{CommandRunner, ProcessBuilder, RunStatus};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Version banner printed by the fake `autoconf --version`.
pub const AUTOCONF_BANNER: &str =
    "autoconf (GNU Autoconf) 2.71\nCopyright (C) 2021 Free Software Foundation, Inc.\n";

/// Host with a configurable platform and tool set.
///
/// Every tool resolves to `/usr/bin/<name>` unless removed.
#[derive(Debug)]
pub struct FakeHost {
    platform: String,
    missing: Vec<String>,
    version_output: String,
    lookups: Mutex<Vec<String>>,
}

impl FakeHost {
    /// A Linux host with the autotools installed.
    pub fn linux() -> Self {
        FakeHost {
            platform: "Linux".to_string(),
            missing: Vec::new(),
            version_output: AUTOCONF_BANNER.to_string(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = platform.to_string();
        self
    }

    /// Make `tool` unresolvable.
    pub fn without_tool(mut self, tool: &str) -> Self {
        self.missing.push(tool.to_string());
        self
    }

    /// Replace what `autoconf --version` prints.
    pub fn with_version_output(mut self, output: &str) -> Self {
        self.version_output = output.to_string();
        self
    }

    /// Tools looked up so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl Host for FakeHost {
    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn find_tool(&self, name: &str) -> Option<PathBuf> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(name.to_string());
        }
        if self.missing.iter().any(|m| m == name) {
            None
        } else {
            Some(PathBuf::from("/usr/bin").join(name))
        }
    }

    fn version_output(&self, _tool: &Path) -> Result<String> {
        Ok(self.version_output.clone())
    }
}

/// A command seen by [`MockRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Program and arguments joined by spaces
    pub command: String,
    pub cwd: Option<PathBuf>,
    pub quiet: bool,
}

/// Runner that records commands instead of executing them.
///
/// Commands succeed unless their text starts with a prefix registered via
/// [`MockRunner::fail`].
#[derive(Debug, Default)]
pub struct MockRunner {
    failures: BTreeMap<String, i32>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Exit with `code` for commands starting with `prefix`.
    pub fn fail(mut self, prefix: &str, code: i32) -> Self {
        self.failures.insert(prefix.to_string(), code);
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Command strings of all recorded calls.
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    fn exit_code(&self, command: &str) -> i32 {
        self.failures
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, code)| *code)
            .unwrap_or(0)
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &ProcessBuilder, quiet: bool) -> Result<RunStatus> {
        let command = cmd.display_command();
        let code = self.exit_code(&command);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                command,
                cwd: cmd.get_cwd().map(Path::to_path_buf),
                quiet,
            });
        }
        Ok(RunStatus::from_code(Some(code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_host_resolves_required_tools() {
        let host = FakeHost::linux().without_tool("automake");
        for tool in REQUIRED_TOOLS {
            assert_eq!(host.find_tool(tool).is_some(), *tool != "automake");
        }
        assert_eq!(host.lookups().len(), REQUIRED_TOOLS.len());
    }

    #[test]
    fn test_mock_runner_records_and_fails_by_prefix() {
        let runner = MockRunner::new().fail("make", 2);

        let ok = runner
            .run(&ProcessBuilder::new("aclocal").cwd("/b"), true)
            .unwrap();
        let failed = runner.run(&ProcessBuilder::new("make"), false).unwrap();

        assert!(ok.success());
        assert_eq!(failed.code, Some(2));
        assert_eq!(runner.commands(), ["aclocal", "make"]);
        assert_eq!(runner.calls()[0].cwd.as_deref(), Some(Path::new("/b")));
        assert!(!runner.calls()[1].quiet);
    }
}
