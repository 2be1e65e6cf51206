//! `amgen bootstrap` command

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
        .run(&manifest, Stage::Bootstrap)?;

    shell.status(
        Status::Finished,
        format!(
            "bootstrapped {}; run ./configure && make there",
            relative_path(ctx.cwd(), &generation.build_dir).display()
        ),
    );

    Ok(())
}
