//! Rendering of `configure.ac` and `Makefile.am`.
//!
//! Directive order in both files is fixed; autoconf and automake read them
//! in sequence.

use super::discovery::{LibraryUnit, SourceFileSet};
use super::toolchain::{EnvError, VERSION_TOOL};
use crate::core::manifest::BuildSettings;
use crate::core::{Define, ProjectInfo};

/// Name of the generated autoconf input.
pub const CONFIGURE_AC: &str = "configure.ac";

/// Name of the generated automake input.
pub const MAKEFILE_AM: &str = "Makefile.am";

/// Macro directory inside the build tree.
pub const MACRO_DIR: &str = "m4";

/// Compiler flags every build starts from.
const BASE_CFLAGS: &str = "-I/usr/local/include -I./include -I./src -std=gnu11 -Wno-unused-result";

/// Source lists break onto a continuation line before every 8th entry.
const FILES_PER_LINE: usize = 8;

/// Sources discovered in the build tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildLayout {
    /// Top-level `src/*.c` files of the program
    pub main_sources: SourceFileSet,

    /// One entry per library subdirectory
    pub units: Vec<LibraryUnit>,
}

/// Render `configure.ac`.
pub fn render_configure_ac(project: &ProjectInfo, libs: &[String]) -> Result<String, EnvError> {
    let version = project
        .tool_version(VERSION_TOOL)
        .ok_or_else(|| EnvError::ToolVersion {
            tool: VERSION_TOOL.to_string(),
        })?;

    let mut out = String::new();
    out.push_str(&format!("AC_PREREQ([{}])\n", version));
    out.push_str(&format!("AC_INIT([{}], [{}])\n", project.name, project.version));
    out.push_str("AC_CONFIG_SRCDIR([config.h.in])\n");
    out.push_str("AC_CONFIG_HEADERS([config.h])\n");
    out.push_str(&format!("AC_CONFIG_MACRO_DIR([{}])\n", MACRO_DIR));
    out.push_str("LT_INIT\n");
    out.push_str("AC_PROG_CC\n");
    out.push_str("AC_PROG_RANLIB\n");
    if !libs.is_empty() {
        out.push_str(&format!("AC_CHECK_LIB([{}])\n", libs.join(" ")));
    }
    out.push_str("AM_INIT_AUTOMAKE([foreign subdir-objects -Werror])\n");
    out.push_str("AC_OUTPUT([Makefile])\n");
    Ok(out)
}

/// Render `Makefile.am`.
pub fn render_makefile_am(
    project: &ProjectInfo,
    build: &BuildSettings,
    defines: &[Define],
    layout: &BuildLayout,
) -> String {
    let mut out = String::new();
    out.push_str("ARFLAGS = cr\n");
    out.push_str(&format!("ACLOCAL_AMFLAGS = -I {}\n", MACRO_DIR));
    out.push_str("LDFLAGS = -L/usr/local/lib\n");
    if !build.libs.is_empty() {
        let libs: Vec<_> = build.libs.iter().map(|l| format!("-l{}", l)).collect();
        out.push_str(&format!("LIBS = {}\n", libs.join(" ")));
    }

    let mut cflags = vec![BASE_CFLAGS.to_string()];
    cflags.extend(build.include_dirs.iter().map(|dir| format!("-I{}", dir)));
    cflags.extend(layout.units.iter().map(LibraryUnit::include_flag));
    cflags.extend(defines.iter().map(Define::to_flag));
    if project.is_linux() {
        cflags.push("-DLINUX".to_string());
    }
    out.push_str(&format!("AM_CFLAGS = {}\n\n", cflags.join(" ")));

    let program = canonical_name(&project.name);
    let archives: Vec<_> = layout.units.iter().map(LibraryUnit::archive).collect();
    let archives = archives.join(" ");

    out.push_str(&format!("bin_PROGRAMS = {}\n", project.name));
    out.push_str(&source_list(
        &format!("{}_SOURCES = ", program),
        &layout.main_sources,
    ));
    out.push_str(&format!("{}_LDADD = {}\n\n", program, archives));
    out.push_str("AUTOMAKE_OPTIONS = foreign\n");
    out.push_str(&format!("noinst_LIBRARIES = {}\n\n", archives));

    for unit in &layout.units {
        out.push_str(&source_list(
            &format!("lib{}_a_SOURCES = ", canonical_name(&unit.name)),
            &unit.sources,
        ));
        out.push('\n');
    }

    out
}

/// `head` followed by the files, each trailed by a space, with a
/// continuation break before every 8th file.
pub fn source_list(head: &str, files: &[String]) -> String {
    let mut out = head.to_string();
    for (i, file) in files.iter().enumerate() {
        if i % FILES_PER_LINE == FILES_PER_LINE - 1 {
            out.push_str("\\\n\t");
        }
        out.push_str(file);
        out.push(' ');
    }
    out.push('\n');
    out
}

/// Automake variable prefix for a target name: characters other than ASCII
/// alphanumerics, `_` and `@` become `_`.
pub fn canonical_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '@' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
