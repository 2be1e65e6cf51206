//! `amgen defines` command
//!
//! Prints the define tokens the current config resolves to, one per line.
//! Needs no autotools installed.

use anyhow::Result;

use crate::cli::DefinesArgs;
use amgen::ops::resolve_defines;
use amgen::util::GlobalContext;
use amgen::Define;

pub fn execute(args: DefinesArgs, ctx: &GlobalContext) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let defines = resolve_defines(&manifest)?;

    if args.json {
        let tokens: Vec<String> = defines.iter().map(Define::token).collect();
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    for define in &defines {
        if args.flags {
            println!("{}", define.to_flag());
        } else {
            println!("{}", define.token());
        }
    }

    Ok(())
}
