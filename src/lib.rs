//! amgen - bootstrap an autotools build tree for a C project
//!
//! This crate provides the library side of the `amgen` tool: resolving a
//! `KEY=VALUE` build configuration against a typed option schema, turning it
//! into preprocessor defines, discovering sources, rendering `configure.ac`
//! and `Makefile.am`, and driving the autotools steps that follow.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and fakes for amgen unit tests.
///
/// Only compiled for tests. Provides a recording command runner, a fake
/// host for platform/tool lookups and on-disk project fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    define::Define, manifest::Manifest, project::ProjectInfo, schema::OptionKind,
    schema::OptionSpec, schema::Schema,
};

pub use resolver::{ConfigError, ResolvedConfig};
pub use util::context::GlobalContext;
