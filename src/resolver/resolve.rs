//! Resolve a config file against the option schema.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use super::config_file::{self, ConfigEntry};
use super::errors::ConfigError;
use crate::core::schema::{OptionKind, Schema};

/// An option with its final raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgument {
    pub name: String,
    pub kind: OptionKind,
    pub value: String,
}

/// Every schema option resolved to a value, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    args: Vec<ResolvedArgument>,
}

impl ResolvedConfig {
    /// Resolved arguments in schema order.
    pub fn args(&self) -> &[ResolvedArgument] {
        &self.args
    }

    /// Get the value of an option by name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedArgument> {
        self.args.iter()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Resolve parsed config entries against a schema.
///
/// Unknown keys are rejected before any value is resolved. A later entry for
/// the same key overrides an earlier one.
pub fn resolve(schema: &Schema, entries: &[ConfigEntry]) -> Result<ResolvedConfig, ConfigError> {
    let mut supplied: HashMap<&str, &str> = HashMap::new();
    for entry in entries {
        if !schema.contains(&entry.key) {
            return Err(ConfigError::UnknownKey {
                key: entry.key.clone(),
            });
        }
        supplied.insert(entry.key.as_str(), entry.value.as_str());
    }

    let mut args = Vec::with_capacity(schema.len());
    for option in schema.options() {
        let value = match supplied.get(option.name.as_str()) {
            Some(value) => value.to_string(),
            None => match &option.default {
                Some(default) => {
                    tracing::debug!("{} not set, using default `{}`", option.name, default);
                    default.clone()
                }
                None => {
                    return Err(ConfigError::MissingValue {
                        key: option.name.clone(),
                    })
                }
            },
        };

        args.push(ResolvedArgument {
            name: option.name.clone(),
            kind: option.kind.clone(),
            value,
        });
    }

    Ok(ResolvedConfig { args })
}

/// Load a config file and resolve it against a schema.
pub fn resolve_file(schema: &Schema, path: &Path) -> Result<ResolvedConfig> {
    let entries = config_file::load(path)?;
    Ok(resolve(schema, &entries)?)
}
