//! `amgen generate` command

use anyhow::Result;

use amgen::builder::SystemHost;
use amgen::ops::{Pipeline, Stage};
use amgen::util::fs::relative_path;
use amgen::util::shell::{Shell, Status};
use amgen::util::{GlobalContext, SystemRunner};

pub fn execute(ctx: &GlobalContext, shell: &Shell) -> Result<()> {
    let manifest = ctx.load_manifest()?;

    let generation = Pipeline::new(&SystemRunner, &SystemHost)
        .with_shell(shell)
        .run(&manifest, Stage::Generate)?;

    shell.status(
        Status::Created,
        format!(
            "{} ({} librar{})",
            relative_path(ctx.cwd(), &generation.build_dir).display(),
            generation.layout.units.len(),
            if generation.layout.units.len() == 1 { "y" } else { "ies" }
        ),
    );

    Ok(())
}
