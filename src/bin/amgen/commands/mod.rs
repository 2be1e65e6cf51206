//! Command implementations

pub mod bootstrap;
pub mod build;
pub mod clean;
pub mod completions;
pub mod defines;
pub mod generate;
