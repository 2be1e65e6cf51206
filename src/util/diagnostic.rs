//! User-friendly diagnostic messages.
//!
//! Every fatal error is printed as a single diagnostic: the message naming
//! the offending key, tool or command, optional context lines and suggested
//! fixes.

use std::fmt;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str = "Create an Amgen.toml in the project root";

    /// Suggestion when a config key has no schema entry.
    pub const DECLARE_OPTION: &str =
        "Declare it as an [[option]] in Amgen.toml or remove the line";

    /// Suggestion when a required tool is missing.
    pub const INSTALL_AUTOTOOLS: &str =
        "Install autoconf, automake and libtool with your package manager";

    /// Suggestion when an external step fails.
    pub const RERUN_VERBOSE: &str =
        "Run the failing command by hand in the build directory to see its output";
}

/// An error message with optional context and suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let error_prefix = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };
        output.push_str(&format!("{}: {}\n", error_prefix, self.message));

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("cannot find `automake`")
            .with_context("required by the bootstrap sequence")
            .with_suggestion("Install automake")
            .with_suggestion("Add its directory to PATH");

        let output = diag.format(false);
        assert!(output.starts_with("error: cannot find `automake`\n"));
        assert!(output.contains("  = required by the bootstrap sequence"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("2. Add its directory to PATH"));
    }

    #[test]
    fn test_without_suggestions() {
        let output = Diagnostic::error("`NAME` is not set").format(false);
        assert_eq!(output, "error: `NAME` is not set\n");
    }

    #[test]
    fn test_color_prefix() {
        let output = Diagnostic::error("boom").format(true);
        assert!(output.starts_with("\x1b[1;31merror\x1b[0m: boom\n"));
    }
}
