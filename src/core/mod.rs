//! Core data structures for amgen.
//!
//! This module contains the foundational types used throughout amgen:
//! - The option schema and its typed kinds
//! - Preprocessor define tokens
//! - The `Amgen.toml` manifest
//! - Per-run project information

pub mod define;
pub mod manifest;
pub mod project;
pub mod schema;

pub use define::Define;
pub use manifest::{find_manifest, Manifest, ManifestError, MANIFEST_NAME};
pub use project::{ProjectInfo, ToolInfo};
pub use schema::{OptionKind, OptionSpec, Schema};
