//! High-level operations.
//!
//! This module contains the implementation of amgen commands.

pub mod clean;
pub mod generate;
pub mod pipeline;

pub use clean::clean;
pub use generate::{generate, resolve_defines, Generation};
pub use pipeline::{bootstrap_steps, build_steps, ExecError, Pipeline, Policy, Stage, Step};
