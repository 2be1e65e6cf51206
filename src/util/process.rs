//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{bail, Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the working directory.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(self.resolved_program());
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Programs given as relative paths (`./configure`) are resolved against
    /// the working directory; bare names are left to `PATH` lookup.
    fn resolved_program(&self) -> PathBuf {
        let has_dir = self.program.components().count() > 1;
        match self.cwd {
            Some(ref cwd) if has_dir && self.program.is_relative() => cwd.join(&self.program),
            _ => self.program.clone(),
        }
    }

    /// Execute the command, capturing stdout and stderr.
    pub fn exec(&self) -> Result<Output> {
        self.build_command()
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))
    }

    /// Execute and require success.
    pub fn exec_and_check(&self) -> Result<Output> {
        let output = self.exec()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`{}` failed with exit code {:?}\n{}",
                self.display_command(),
                output.status.code(),
                stderr
            );
        }
        Ok(output)
    }

    /// Execute with inherited output and return the exit status.
    pub fn status(&self) -> Result<RunStatus> {
        let status = self
            .build_command()
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;
        Ok(RunStatus::from_code(status.code()))
    }

    /// Execute with all output discarded and return the exit status.
    pub fn status_quiet(&self) -> Result<RunStatus> {
        let status = self
            .build_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;
        Ok(RunStatus::from_code(status.code()))
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn from_code(code: Option<i32>) -> Self {
        RunStatus { code }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Runs commands to completion. Implemented by [`SystemRunner`] and by
/// recording fakes in tests.
pub trait CommandRunner {
    /// Run `cmd`, blocking until it exits. When `quiet` is set, all output
    /// is discarded; otherwise it is passed through to the terminal.
    fn run(&self, cmd: &ProcessBuilder, quiet: bool) -> Result<RunStatus>;
}

/// Runs commands as real subprocesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &ProcessBuilder, quiet: bool) -> Result<RunStatus> {
        tracing::debug!("running `{}`", cmd.display_command());
        if quiet {
            cmd.status_quiet()
        } else {
            cmd.status()
        }
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
