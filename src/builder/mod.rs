//! Build tree inspection and descriptor rendering.
//!
//! This module validates the host toolchain, discovers sources in the
//! generated build tree and renders `configure.ac` / `Makefile.am`.

pub mod descriptor;
pub mod discovery;
pub mod toolchain;

pub use descriptor::{render_configure_ac, render_makefile_am, BuildLayout};
pub use discovery::{discover, discover_units, library_units, LibraryUnit, SourceFileSet};
pub use toolchain::{validate, EnvError, Host, SystemHost};
