//! Shrinkwrap command handler

use std::path::PathBuf;

use anyhow::Result;

use rigger::application::{ShrinkwrapOptions, ShrinkwrapUseCase};
use rigger::infrastructure::NpmPackageManager;

use super::Context;

pub struct ShrinkwrapArgs {
    pub existing: bool,
    pub format: bool,
    pub dev: bool,
    pub file: Option<PathBuf>,
    pub npm: Option<String>,
}

pub fn cmd_shrinkwrap(ctx: &Context, args: ShrinkwrapArgs) -> Result<()> {
    let mut options = ShrinkwrapOptions::from(&ctx.config.shrinkwrap)
        .keep_existing(args.existing)
        .only_format(args.format);
    if args.dev {
        options = options.with_dev(true);
    }
    if let Some(file) = args.file {
        options = options.with_file(file);
    }

    let npm = match args.npm {
        Some(program) => NpmPackageManager::with_program(program, ctx.project_root()),
        None => NpmPackageManager::new(ctx.project_root()),
    };

    let result = ShrinkwrapUseCase::new(npm, ctx.project_root()).execute(&options)?;
    println!(
        "Wrote {} ({} entries)",
        result.file.display(),
        result.entries
    );
    Ok(())
}
