//! Build command handler: clean, then test everything

use anyhow::Result;

use super::{cmd_clean, cmd_test, Context};

pub fn cmd_build(ctx: &Context) -> Result<()> {
    cmd_clean(ctx, false)?;
    cmd_test(ctx, &[])
}
