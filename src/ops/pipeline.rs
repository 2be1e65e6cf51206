//! The bootstrap pipeline.
//!
//! Drives a project from its manifest to a built binary:
//!
//! ```text
//! Configure -> Generate -> Bootstrap -> Build -> Done
//! ```
//!
//! `Configure` resolves the config file and validates the host, `Generate`
//! writes the build tree, `Bootstrap` runs the autotools chain and `Build`
//! runs `./configure` and `make`. Every external step runs with the build
//! directory as its working directory.

use std::cell::Cell;
use std::fmt;
use std::path::Path;

use anyhow::Result;
use thiserror::Error;

use super::generate::{prepare, write_build_tree, Generation};
use crate::builder::toolchain::Host;
use crate::core::Manifest;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::process::{CommandRunner, ProcessBuilder, RunStatus};
use crate::util::shell::{format_duration, Shell, Status};

/// Error running an external step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error("failed to run `{command}` ({status})")]
    Failed { command: String, status: RunStatus },

    #[error("could not start `{command}`: {reason}")]
    Spawn { command: String, reason: String },
}

impl ExecError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            ExecError::Failed { .. } => diag.with_suggestion(suggestions::RERUN_VERBOSE),
            ExecError::Spawn { .. } => diag.with_suggestion(suggestions::INSTALL_AUTOTOOLS),
        }
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Configure,
    Generate,
    Bootstrap,
    Build,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Configure => "configure",
            Stage::Generate => "generate",
            Stage::Bootstrap => "bootstrap",
            Stage::Build => "build",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}

/// How a step's output and exit status are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Output passes through; failure aborts
    Loud,

    /// Output is discarded; failure aborts
    Quiet,

    /// Output is discarded; failure is logged and ignored
    QuietIgnore,
}

impl Policy {
    fn is_quiet(self) -> bool {
        !matches!(self, Policy::Loud)
    }
}

/// One external command of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub program: String,
    pub args: Vec<String>,
    pub policy: Policy,
}

impl Step {
    pub fn new(program: &str, args: &[&str], policy: Policy) -> Self {
        Step {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            policy,
        }
    }

    /// The command to run inside `cwd`.
    pub fn command(&self, cwd: &Path) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .args(&self.args)
            .cwd(cwd)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The autotools chain, in order.
///
/// `automake --add-missing` may fail on the first pass before the support
/// files exist; `autoreconf -if` repairs the tree afterwards.
pub fn bootstrap_steps() -> Vec<Step> {
    vec![
        Step::new("aclocal", &[], Policy::Quiet),
        Step::new("autoconf", &[], Policy::Quiet),
        Step::new("autoheader", &[], Policy::Quiet),
        Step::new(
            "touch",
            &["NEWS", "README", "AUTHORS", "ChangeLog"],
            Policy::Loud,
        ),
        Step::new("automake", &["--add-missing"], Policy::QuietIgnore),
        Step::new("autoreconf", &["-if"], Policy::Quiet),
    ]
}

/// Configure and compile the bootstrapped tree.
pub fn build_steps() -> Vec<Step> {
    vec![
        Step::new("./configure", &[], Policy::Quiet),
        Step::new("make", &[], Policy::Loud),
    ]
}

/// Runs the stages up to a chosen last stage.
pub struct Pipeline<'a> {
    runner: &'a dyn CommandRunner,
    host: &'a dyn Host,
    shell: Option<&'a Shell>,
    stage: Cell<Option<Stage>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(runner: &'a dyn CommandRunner, host: &'a dyn Host) -> Self {
        Pipeline {
            runner,
            host,
            shell: None,
            stage: Cell::new(None),
        }
    }

    /// Report progress on `shell`.
    pub fn with_shell(mut self, shell: &'a Shell) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Run every stage up to and including `last`. Configure and Generate
    /// always run; `Done` is reached only once Build has finished.
    pub fn run(&self, manifest: &Manifest, last: Stage) -> Result<Generation> {
        self.enter(Stage::Configure);
        self.report(
            Status::Resolving,
            format!("options from {}", manifest.build.config.display()),
        );
        let prepared = prepare(manifest, self.host)?;

        self.enter(Stage::Generate);
        self.report(
            Status::Generating,
            format!("{} v{}", prepared.project.name, prepared.project.version),
        );
        let generation = write_build_tree(manifest, prepared)?;

        if last >= Stage::Bootstrap {
            self.enter(Stage::Bootstrap);
            self.run_steps(&bootstrap_steps(), &generation.build_dir)?;
        }

        if last >= Stage::Build {
            self.enter(Stage::Build);
            self.report(Status::Building, &generation.project.name);
            self.run_steps(&build_steps(), &generation.build_dir)?;
            self.enter(Stage::Done);
        }

        Ok(generation)
    }

    /// Run `steps` in order inside `cwd`, stopping at the first failure.
    pub fn run_steps(&self, steps: &[Step], cwd: &Path) -> Result<()> {
        for step in steps {
            self.run_step(step, cwd)?;
        }
        Ok(())
    }

    /// Run a single step under its policy.
    pub fn run_step(&self, step: &Step, cwd: &Path) -> Result<(), ExecError> {
        let command = step.to_string();
        let cmd = step.command(cwd);

        let spinner = match (step.policy.is_quiet(), self.shell) {
            (true, Some(shell)) => Some(shell.spinner(&command)),
            (false, Some(shell)) => {
                shell.status(Status::Running, &command);
                None
            }
            (_, None) => None,
        };

        let status = self
            .runner
            .run(&cmd, step.policy.is_quiet())
            .map_err(|e| ExecError::Spawn {
                command: command.clone(),
                reason: format!("{:#}", e),
            })?;

        if let Some(spinner) = spinner {
            let elapsed = spinner.finish();
            tracing::debug!("`{}` took {}", command, format_duration(elapsed));
        }

        if status.success() {
            return Ok(());
        }
        if step.policy == Policy::QuietIgnore {
            tracing::debug!("ignoring failure of `{}` ({})", command, status);
            return Ok(());
        }
        Err(ExecError::Failed { command, status })
    }

    /// The last stage entered, if any.
    pub fn stage(&self) -> Option<Stage> {
        self.stage.get()
    }

    fn enter(&self, stage: Stage) {
        tracing::info!("stage: {}", stage);
        self.stage.set(Some(stage));
    }

    fn report(&self, status: Status, msg: impl fmt::Display) {
        if let Some(shell) = self.shell {
            shell.status(status, msg);
        }
    }
}
