//! Clean command handler

use anyhow::Result;

use rigger::application::{CleanOptions, CleanUseCase};

use super::Context;

pub fn cmd_clean(ctx: &Context, dry_run: bool) -> Result<()> {
    let options = CleanOptions::from(&ctx.config.clean).with_dry_run(dry_run);
    let result = CleanUseCase::new(ctx.project_root()).execute(&options)?;

    let verb = if dry_run { "Would remove" } else { "Removed" };
    for path in &result.removed {
        println!("{verb} {}", path.display());
    }
    if result.is_noop() {
        println!("Nothing to clean");
    }
    Ok(())
}
