//! Configuration error types and diagnostics.

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error in the option schema or the build configuration file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to parse line {line_no}: `{line}`")]
    Parse { line_no: usize, line: String },

    #[error("cannot find the definition of `{key}`")]
    UnknownKey { key: String },

    #[error("`{key}` is not set")]
    MissingValue { key: String },

    #[error("`{key}` has no mapping for value `{value}`")]
    UnmappedValue { key: String, value: String },

    #[error("invalid type `{ty}` for `{key}`")]
    UnsupportedType { key: String, ty: String },

    #[error("invalid value `{value}` for `{key}`: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("option `{key}` is declared more than once")]
    DuplicateOption { key: String },

    #[error("option `{key}` declares a value map, but only `int` options may")]
    MapNotAllowed { key: String },
}

impl ConfigError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            ConfigError::Parse { .. } => diag
                .with_context("each line must have the form KEY=VALUE with a single `=`")
                .with_context("`=` inside a trailing `#` comment counts too")
                .with_suggestion("Remove the extra `=` characters from the line"),

            ConfigError::UnknownKey { key } => diag
                .with_context(format!("`{}` is not declared as an [[option]]", key))
                .with_suggestion(suggestions::DECLARE_OPTION),

            ConfigError::MissingValue { key } => diag
                .with_context(format!("`{}` has no value in the config file and no default", key))
                .with_suggestion(format!("Set `{}=...` in the config file", key))
                .with_suggestion("Add a `default` to the option in Amgen.toml"),

            ConfigError::UnmappedValue { key, value } => diag
                .with_context(format!("`{}` only accepts values listed in its `map`", key))
                .with_suggestion(format!("Add `{} = \"...\"` to the map of `{}`", value, key)),

            ConfigError::UnsupportedType { .. } => {
                diag.with_suggestion("Use one of the supported option types: bool, str, int")
            }

            ConfigError::InvalidValue { .. } => diag,

            ConfigError::DuplicateOption { .. } => {
                diag.with_suggestion("Option names are case-insensitive; remove one of them")
            }

            ConfigError::MapNotAllowed { key } => diag.with_suggestion(format!(
                "Change `{}` to `type = \"int\"` or drop its map",
                key
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_culprit() {
        let err = ConfigError::Parse {
            line_no: 3,
            line: "FOO=1=2".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse line 3: `FOO=1=2`");

        let err = ConfigError::UnknownKey {
            key: "BOGUS".to_string(),
        };
        assert!(err.to_string().contains("BOGUS"));
    }

    #[test]
    fn test_missing_value_diagnostic() {
        let diag = ConfigError::MissingValue {
            key: "NAME".to_string(),
        }
        .to_diagnostic();

        let output = diag.format(false);
        assert!(output.contains("error: `NAME` is not set"));
        assert!(output.contains("1. Set `NAME=...`"));
    }

    #[test]
    fn test_parse_diagnostic_mentions_comments() {
        let output = ConfigError::Parse {
            line_no: 1,
            line: "LEVEL=2 # a=1".to_string(),
        }
        .to_diagnostic()
        .format(false);

        assert!(output.contains("`=` inside a trailing `#` comment counts too"));
        assert!(output.contains("1. Remove the extra `=` characters"));
    }
}
