//! Centralized shell output and progress management.
//!
//! The Shell provides a unified API for CLI status output:
//! - Status messages right-aligned to a fixed column
//! - A spinner while quiet external steps run (via indicatif)
//!
//! Commands never manage spacing or indentation directly.

use std::fmt::Display;
use std::io::{self, IsTerminal};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: errors only, no spinners
    Quiet,
    /// Default: status messages + spinners
    #[default]
    Normal,
    /// --verbose: status messages, debug logs, no spinners
    Verbose,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Created,
    Finished,
    Removed,

    // In-progress statuses (cyan)
    Resolving,
    Generating,
    Running,
    Building,

    // Warning statuses (yellow)
    Skipped,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Created => "Created",
            Status::Finished => "Finished",
            Status::Removed => "Removed",
            Status::Resolving => "Resolving",
            Status::Generating => "Generating",
            Status::Running => "Running",
            Status::Building => "Building",
            Status::Skipped => "Skipped",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Created | Status::Finished | Status::Removed => "\x1b[1;32m",
            Status::Resolving | Status::Generating | Status::Running | Status::Building => {
                "\x1b[1;36m"
            }
            Status::Skipped => "\x1b[1;33m",
        }
    }
}

/// Width status words are right-aligned to.
const STATUS_WIDTH: usize = 12;

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
}

impl Shell {
    /// Create a new shell.
    pub fn new(verbosity: Verbosity, color: ColorChoice) -> Self {
        let use_color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };

        Shell {
            verbosity,
            use_color,
        }
    }

    /// Create a shell from CLI flags. Quiet wins over verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Shell::new(verbosity, color)
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message: `{status:>12} {message}`.
    ///
    /// Nothing is printed in quiet mode; errors go through diagnostics.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_quiet() {
            return;
        }
        eprintln!("{} {}", self.format_status(status), msg);
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                text,
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }

    /// Start a spinner for a step whose own output is suppressed.
    ///
    /// Prints a plain status line instead when stderr is not a terminal or
    /// the shell is verbose; prints nothing when quiet.
    pub fn spinner(&self, msg: impl Display) -> Spinner {
        let message = msg.to_string();

        let pb = if self.is_quiet() {
            None
        } else if self.is_verbose() || !io::stderr().is_terminal() {
            self.status(Status::Running, &message);
            None
        } else {
            let pb = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            pb.set_style(style);
            pb.set_message(message);
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        };

        Spinner {
            pb,
            start: Instant::now(),
        }
    }
}

/// A running spinner; cleared when finished or dropped.
pub struct Spinner {
    pb: Option<ProgressBar>,
    start: Instant,
}

impl Spinner {
    /// Stop the spinner and return how long the step took.
    pub fn finish(self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Format a duration in a human-readable way.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_choice_parse() {
        assert_eq!("auto".parse::<ColorChoice>().unwrap(), ColorChoice::Auto);
        assert_eq!("ALWAYS".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!("never".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("invalid".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "0.50s");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }

    #[test]
    fn test_status_formatting() {
        let shell = Shell::new(Verbosity::Normal, ColorChoice::Never);

        let formatted = shell.format_status(Status::Generating);
        assert_eq!(formatted.trim(), "Generating");
        assert_eq!(formatted.len(), 12);
    }

    #[test]
    fn test_from_flags() {
        assert!(!Shell::from_flags(false, false, ColorChoice::Never).is_quiet());
        assert!(Shell::from_flags(true, false, ColorChoice::Never).is_quiet());
        assert!(Shell::from_flags(false, true, ColorChoice::Never).is_verbose());
        assert!(Shell::from_flags(true, true, ColorChoice::Never).is_quiet());
    }

    #[test]
    fn test_quiet_spinner_is_silent() {
        let shell = Shell::new(Verbosity::Quiet, ColorChoice::Never);
        let spinner = shell.spinner("aclocal");
        assert!(spinner.pb.is_none());
        spinner.finish();
    }
}
