//! CLI definitions using clap.

use std::path::PathBuf;

use amgen::util::shell::ColorChoice;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// amgen - Bootstrap an autotools build tree for a C project
#[derive(Parser)]
#[command(name = "amgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Path to Amgen.toml
    #[arg(long, global = true, value_name = "PATH", env = "AMGEN_MANIFEST_PATH")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the config and write configure.ac and Makefile.am
    Generate,

    /// Generate, then run the autotools chain
    Bootstrap,

    /// Generate, bootstrap, then run ./configure and make
    Build,

    /// Print the resolved preprocessor defines
    Defines(DefinesArgs),

    /// Remove the build directory
    Clean,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct DefinesArgs {
    /// Print as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Print as compiler flags (-DNAME) instead of bare tokens
    #[arg(long, conflicts_with = "json")]
    pub flags: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
