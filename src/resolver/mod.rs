//! Build configuration resolution.
//!
//! Parses the `KEY=VALUE` config file and resolves every schema option to a
//! raw value, falling back to declared defaults.

pub mod config_file;
pub mod errors;
pub mod resolve;

pub use config_file::ConfigEntry;
pub use errors::ConfigError;
pub use resolve::{resolve, resolve_file, ResolvedArgument, ResolvedConfig};
