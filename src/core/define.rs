//! Preprocessor define tokens.
//!
//! Each resolved option yields zero or one [`Define`]. The token form
//! (`NAME`, `NAME=1`, `NAME="text"`) is what users see from `amgen defines`;
//! [`Define::to_flag`] renders the `-D` flag as it appears in `Makefile.am`.

use std::fmt;

use crate::core::schema::OptionKind;
use crate::resolver::errors::ConfigError;
use crate::resolver::{ResolvedArgument, ResolvedConfig};

/// A define ready for emission as a `-D` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Define {
    /// Bare symbol: `NAME`
    Symbol(String),

    /// Integer value: `NAME=value`
    Value { name: String, value: String },

    /// C string literal: `NAME="value"`
    Str { name: String, value: String },

    /// Literal taken verbatim from an option's value map
    Literal(String),
}

impl Define {
    /// The define token, e.g. `NAME="myapp"`.
    pub fn token(&self) -> String {
        self.to_string()
    }

    /// The compiler flag. String literals are single-quoted so the double
    /// quotes survive the shell that runs the compiler.
    pub fn to_flag(&self) -> String {
        match self {
            Define::Str { name, value } => format!("-D{}='\"{}\"'", name, value),
            other => format!("-D{}", other),
        }
    }
}

impl fmt::Display for Define {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Define::Symbol(name) => write!(f, "{}", name),
            Define::Value { name, value } => write!(f, "{}={}", name, value),
            Define::Str { name, value } => write!(f, "{}=\"{}\"", name, value),
            Define::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

/// Derive the define list from a resolved config.
///
/// `initial` holds bare symbols declared directly in the manifest; they come
/// first, followed by one define per option in schema order.
pub fn synthesize(
    initial: &[String],
    config: &ResolvedConfig,
) -> Result<Vec<Define>, ConfigError> {
    let mut defines: Vec<Define> = initial.iter().cloned().map(Define::Symbol).collect();

    for arg in config.iter() {
        if let Some(define) = define_for(arg)? {
            if let Define::Symbol(ref name) = define {
                if defines.iter().any(|d| d.token() == *name) {
                    continue;
                }
            }
            defines.push(define);
        }
    }

    Ok(defines)
}

fn define_for(arg: &ResolvedArgument) -> Result<Option<Define>, ConfigError> {
    match &arg.kind {
        OptionKind::Bool => {
            if parse_flag(arg)? {
                Ok(Some(Define::Symbol(arg.name.clone())))
            } else {
                Ok(None)
            }
        }

        OptionKind::Str => {
            if arg.value.contains(['"', '\'']) {
                return Err(invalid(arg, "a string without quote characters"));
            }
            Ok(Some(Define::Str {
                name: arg.name.clone(),
                value: arg.value.clone(),
            }))
        }

        OptionKind::Int { map: Some(map) } => match map.get(&arg.value) {
            Some(literal) => Ok(Some(Define::Literal(literal.clone()))),
            None => Err(ConfigError::UnmappedValue {
                key: arg.name.clone(),
                value: arg.value.clone(),
            }),
        },

        OptionKind::Int { map: None } => {
            if arg.value.parse::<i64>().is_err() {
                return Err(invalid(arg, "an integer"));
            }
            Ok(Some(Define::Value {
                name: arg.name.clone(),
                value: arg.value.clone(),
            }))
        }
    }
}

/// A bool option is set when its value is a non-zero integer.
fn parse_flag(arg: &ResolvedArgument) -> Result<bool, ConfigError> {
    match arg.value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        value => value
            .parse::<i64>()
            .map(|n| n != 0)
            .map_err(|_| invalid(arg, "an integer or true/false")),
    }
}

fn invalid(arg: &ResolvedArgument, expected: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: arg.name.clone(),
        value: arg.value.clone(),
        expected: expected.to_string(),
    }
}
