//! Build tree generation.
//!
//! Resolves the configuration and validates the host before anything is
//! written; only then mirrors the sources into the build directory and
//! writes `configure.ac` and `Makefile.am`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::descriptor::{
    render_configure_ac, render_makefile_am, BuildLayout, CONFIGURE_AC, MACRO_DIR, MAKEFILE_AM,
};
use crate::builder::discovery::{discover, discover_units};
use crate::builder::toolchain::{self, Host};
use crate::core::define::{self, Define};
use crate::core::{Manifest, ProjectInfo};
use crate::resolver::resolve_file;
use crate::util::fs::{copy_dir_all, ensure_dir, write_atomic};

/// Project trees mirrored into the build directory.
const SOURCE_DIR: &str = "src";
const INCLUDE_DIR: &str = "include";

/// Resolved configuration and validated host, ready to be written out.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub project: ProjectInfo,
    pub defines: Vec<Define>,
}

/// Result of generating a build tree.
#[derive(Debug, Clone)]
pub struct Generation {
    pub project: ProjectInfo,
    pub defines: Vec<Define>,
    pub layout: BuildLayout,
    pub build_dir: PathBuf,
}

/// Resolve the config file against the manifest schema and derive defines.
pub fn resolve_defines(manifest: &Manifest) -> Result<Vec<Define>> {
    let config = resolve_file(&manifest.schema, &manifest.config_path())?;
    Ok(define::synthesize(&manifest.build.defines, &config)?)
}

/// Resolve the configuration, then validate the host. Writes nothing.
pub fn prepare(manifest: &Manifest, host: &dyn Host) -> Result<Prepared> {
    let defines = resolve_defines(manifest)?;
    tracing::debug!("{} define(s) resolved", defines.len());

    let project = toolchain::validate(host, manifest)?;
    Ok(Prepared { project, defines })
}

/// Mirror the project into the build directory and write the descriptors.
pub fn write_build_tree(manifest: &Manifest, prepared: Prepared) -> Result<Generation> {
    let build_dir = manifest.build_dir();
    mirror_sources(manifest.root(), &build_dir)?;

    let layout = BuildLayout {
        main_sources: discover(&build_dir, SOURCE_DIR, false)?,
        units: discover_units(&build_dir)?,
    };
    if layout.main_sources.is_empty() {
        tracing::warn!("no .c files directly under {}/", SOURCE_DIR);
    }
    for unit in &layout.units {
        tracing::debug!("library {}: {} source(s)", unit.name, unit.sources.len());
    }

    let configure_ac = render_configure_ac(&prepared.project, &manifest.build.libs)?;
    let makefile_am = render_makefile_am(
        &prepared.project,
        &manifest.build,
        &prepared.defines,
        &layout,
    );

    install_macro_dir(&manifest.macro_dir(), &build_dir)?;
    write_atomic(&build_dir.join(CONFIGURE_AC), &configure_ac)?;
    write_atomic(&build_dir.join(MAKEFILE_AM), &makefile_am)?;
    tracing::info!("wrote {} and {}", CONFIGURE_AC, MAKEFILE_AM);

    Ok(Generation {
        project: prepared.project,
        defines: prepared.defines,
        layout,
        build_dir,
    })
}

/// Prepare and write in one go.
pub fn generate(manifest: &Manifest, host: &dyn Host) -> Result<Generation> {
    let prepared = prepare(manifest, host)?;
    write_build_tree(manifest, prepared)
}

fn mirror_sources(root: &Path, build_dir: &Path) -> Result<()> {
    let src = root.join(SOURCE_DIR);
    if !src.is_dir() {
        bail!("source directory not found: {}", src.display());
    }
    copy_dir_all(&src, &build_dir.join(SOURCE_DIR))?;

    let include = root.join(INCLUDE_DIR);
    if include.is_dir() {
        copy_dir_all(&include, &build_dir.join(INCLUDE_DIR))?;
    } else {
        tracing::debug!("no {}/ directory to mirror", INCLUDE_DIR);
    }
    Ok(())
}

fn install_macro_dir(macro_src: &Path, build_dir: &Path) -> Result<()> {
    let dest = build_dir.join(MACRO_DIR);
    ensure_dir(&dest)?;
    if macro_src.is_dir() {
        copy_dir_all(macro_src, &dest)?;
    } else {
        tracing::debug!("macro directory {} does not exist", macro_src.display());
    }
    Ok(())
}
