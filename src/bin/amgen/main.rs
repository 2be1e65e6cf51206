//! amgen CLI - autotools bootstrap for C projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use amgen::builder::EnvError;
use amgen::core::ManifestError;
use amgen::ops::ExecError;
use amgen::util::diagnostic::{emit, suggestions, Diagnostic};
use amgen::util::{GlobalContext, Shell};
use amgen::ConfigError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    if let Err(e) = run(cli, &shell) {
        report(&e, &shell);
        std::process::exit(1);
    }
}

fn run(cli: Cli, shell: &Shell) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("amgen=debug")
    } else if cli.quiet {
        EnvFilter::new("amgen=error")
    } else {
        EnvFilter::new("amgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let ctx = GlobalContext::new()?.with_manifest_path(cli.manifest_path);

    match cli.command {
        Commands::Generate => commands::generate::execute(&ctx, shell),
        Commands::Bootstrap => commands::bootstrap::execute(&ctx, shell),
        Commands::Build => commands::build::execute(&ctx, shell),
        Commands::Defines(args) => commands::defines::execute(args, &ctx),
        Commands::Clean => commands::clean::execute(&ctx, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print a known error as a diagnostic, anything else as `error: ...`.
fn report(err: &anyhow::Error, shell: &Shell) {
    let diagnostic = if let Some(e) = err.downcast_ref::<ConfigError>() {
        Some(e.to_diagnostic())
    } else if let Some(e) = err.downcast_ref::<EnvError>() {
        Some(e.to_diagnostic())
    } else if let Some(e) = err.downcast_ref::<ExecError>() {
        Some(e.to_diagnostic())
    } else {
        err.downcast_ref::<ManifestError>()
            .map(|e| Diagnostic::error(e.to_string()).with_suggestion(suggestions::NO_MANIFEST))
    };

    match diagnostic {
        Some(diagnostic) => emit(&diagnostic, shell.use_color()),
        None => eprintln!("error: {:#}", err),
    }
}
