//! `amgen build` command

use std::time::Instant;

use anyhow::Result;

use amgen::builder::SystemHost;
use amgen::ops::{Pipeline, Stage};
use amgen::util::fs::relative_path;
use amgen::util::shell::{format_duration, Shell, Status};
use amgen::util::{GlobalContext, SystemRunner};

pub fn execute(ctx: &GlobalContext, shell: &Shell) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let start = Instant::now();

    let generation = Pipeline::new(&SystemRunner, &SystemHost)
        .with_shell(shell)
        .run(&manifest, Stage::Build)?;

    let binary = generation.build_dir.join(&generation.project.name);
    shell.status(
        Status::Finished,
        format!(
            "`{}` -> {} in {}",
            generation.project.name,
            relative_path(ctx.cwd(), &binary).display(),
            format_duration(start.elapsed())
        ),
    );

    Ok(())
}
