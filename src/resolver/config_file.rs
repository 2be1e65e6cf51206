//! Parser for the `KEY=VALUE` build configuration file.
//!
//! ```text
//! # comment
//! DEBUG=1
//! name = myapp   # trailing comment
//! ```

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use super::errors::ConfigError;

/// One `KEY=VALUE` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// 1-based line number in the config file
    pub line_no: usize,

    /// Uppercased key
    pub key: String,

    /// Value with the inline comment stripped and whitespace trimmed
    pub value: String,
}

/// Parse config file content into entries, in file order.
pub fn parse(content: &str) -> Result<Vec<ConfigEntry>, ConfigError> {
    let mut entries = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // every `=` on the line counts, including any inside a trailing comment
        let mut parts = line.split('=');
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => {
                return Err(ConfigError::Parse {
                    line_no: idx + 1,
                    line: line.to_string(),
                })
            }
        };

        entries.push(ConfigEntry {
            line_no: idx + 1,
            key: key.trim().to_uppercase(),
            value: strip_comment(value).trim().to_string(),
        });
    }

    Ok(entries)
}

fn strip_comment(value: &str) -> &str {
    value.split('#').next().unwrap_or_default()
}

/// Load and parse a config file. A missing file is treated as empty.
pub fn load(path: &Path) -> Result<Vec<ConfigEntry>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read config: {}", path.display()))
        }
    };

    Ok(parse(&content)?)
}
