//! Option schema for the `KEY=VALUE` build configuration.
//!
//! The schema lists every option a config file may set, in declaration
//! order. That order is the order in which defines are emitted.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Deserialize;

use crate::resolver::errors::ConfigError;

/// Kind of an option, carrying its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// Defined as a bare symbol when the value is a non-zero integer.
    Bool,
    /// Defined as a quoted C string literal.
    Str,
    /// Defined as `NAME=value`, or as a literal looked up in `map`.
    Int {
        map: Option<BTreeMap<String, String>>,
    },
}

impl OptionKind {
    /// Name of the kind as written in `Amgen.toml`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Bool => "bool",
            OptionKind::Str => "str",
            OptionKind::Int { .. } => "int",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recognized option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Uppercase option name
    pub name: String,

    /// Kind and kind-specific payload
    pub kind: OptionKind,

    /// Raw default value, used when the config file does not set the option
    pub default: Option<String>,
}

impl OptionSpec {
    /// Create a new option with no default. The name is uppercased.
    pub fn new(name: impl AsRef<str>, kind: OptionKind) -> Self {
        OptionSpec {
            name: name.as_ref().trim().to_uppercase(),
            kind,
            default: None,
        }
    }

    /// Set the raw default value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Option as written in an `[[option]]` table of `Amgen.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOption {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub default: Option<toml::Value>,

    #[serde(default)]
    pub map: Option<BTreeMap<String, toml::Value>>,
}

impl TryFrom<RawOption> for OptionSpec {
    type Error = ConfigError;

    fn try_from(raw: RawOption) -> Result<Self, Self::Error> {
        let name = raw.name.trim().to_uppercase();

        let map = match raw.map {
            Some(map) => {
                let mut literals = BTreeMap::new();
                for (value, literal) in map {
                    literals.insert(value.trim().to_string(), scalar(&name, &literal)?);
                }
                Some(literals)
            }
            None => None,
        };

        let kind = match raw.ty.trim().to_lowercase().as_str() {
            "bool" => OptionKind::Bool,
            "str" => OptionKind::Str,
            "int" => OptionKind::Int { map: None },
            _ => {
                return Err(ConfigError::UnsupportedType {
                    key: name,
                    ty: raw.ty,
                })
            }
        };

        let kind = match (kind, map) {
            (OptionKind::Int { .. }, map) => OptionKind::Int { map },
            (_, Some(_)) => return Err(ConfigError::MapNotAllowed { key: name }),
            (kind, None) => kind,
        };

        let default = raw
            .default
            .as_ref()
            .map(|value| scalar(&name, value))
            .transpose()?;

        Ok(OptionSpec {
            name,
            kind,
            default,
        })
    }
}

/// Normalize a TOML scalar to the raw string form a config file would carry.
fn scalar(key: &str, value: &toml::Value) -> Result<String, ConfigError> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Boolean(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: other.to_string(),
            expected: "a string, integer or boolean".to_string(),
        }),
    }
}

/// Ordered, immutable set of option specs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    options: Vec<OptionSpec>,
}

impl Schema {
    /// Build a schema, rejecting duplicate option names.
    pub fn new(options: Vec<OptionSpec>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.name.as_str()) {
                return Err(ConfigError::DuplicateOption {
                    key: option.name.clone(),
                });
            }
        }
        Ok(Schema { options })
    }

    /// Build a schema from the raw `[[option]]` tables of a manifest.
    pub fn from_raw(raw: Vec<RawOption>) -> Result<Self, ConfigError> {
        let options = raw
            .into_iter()
            .map(OptionSpec::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(options)
    }

    /// Options in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Look up an option by its (already uppercased) name.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(toml_src: &str) -> RawOption {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn test_raw_option_bool_default() {
        let spec = OptionSpec::try_from(raw(
            "name = \"debug\"\ntype = \"bool\"\ndefault = false",
        ))
        .unwrap();
        assert_eq!(spec.name, "DEBUG");
        assert_eq!(spec.kind, OptionKind::Bool);
        assert_eq!(spec.default.as_deref(), Some("0"));
    }

    #[test]
    fn test_raw_option_int_map() {
        let spec = OptionSpec::try_from(raw(
            "name = \"LEVEL\"\ntype = \"int\"\ndefault = 2\nmap = { 1 = \"-O1\", 2 = \"-O2\" }",
        ))
        .unwrap();

        assert_eq!(spec.default.as_deref(), Some("2"));
        match spec.kind {
            OptionKind::Int { map: Some(map) } => {
                assert_eq!(map.get("1").map(String::as_str), Some("-O1"));
                assert_eq!(map.get("2").map(String::as_str), Some("-O2"));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_raw_option_unsupported_type() {
        let err = OptionSpec::try_from(raw("name = \"RATIO\"\ntype = \"float\"")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsupportedType {
                key: "RATIO".to_string(),
                ty: "float".to_string()
            }
        );
    }

    #[test]
    fn test_raw_option_map_on_str_rejected() {
        let err = OptionSpec::try_from(raw(
            "name = \"NAME\"\ntype = \"str\"\nmap = { a = \"b\" }",
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MapNotAllowed { .. }));
    }

    #[test]
    fn test_schema_rejects_duplicates() {
        let err = Schema::new(vec![
            OptionSpec::new("debug", OptionKind::Bool),
            OptionSpec::new("DEBUG", OptionKind::Str),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateOption {
                key: "DEBUG".to_string()
            }
        );
    }

    #[test]
    fn test_schema_keeps_declaration_order() {
        let schema = Schema::new(vec![
            OptionSpec::new("b", OptionKind::Bool),
            OptionSpec::new("a", OptionKind::Str),
        ])
        .unwrap();
        let names: Vec<_> = schema.options().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert!(schema.contains("A"));
        assert!(!schema.contains("a"));
    }
}
