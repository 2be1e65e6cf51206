//! `amgen clean` command

use anyhow::Result;

use amgen::ops::clean;
use amgen::util::fs::relative_path;
use amgen::util::shell::{Shell, Status};
use amgen::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, shell: &Shell) -> Result<()> {
    let manifest = ctx.load_manifest()?;

    match clean(&manifest)? {
        Some(dir) => shell.status(
            Status::Removed,
            relative_path(ctx.cwd(), &dir).display(),
        ),
        None => shell.status(Status::Skipped, "nothing to clean"),
    }

    Ok(())
}
