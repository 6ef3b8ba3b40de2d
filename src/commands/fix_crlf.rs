//! Carriage-return fix command handler

use std::path::PathBuf;

use anyhow::Result;

use super::Context;

pub fn cmd_fix_crlf(ctx: &Context, files: &[PathBuf]) -> Result<()> {
    let files: Vec<PathBuf> = files
        .iter()
        .map(|f| {
            if f.is_absolute() {
                f.clone()
            } else {
                ctx.project_root().join(f)
            }
        })
        .collect();

    let changed = rigger::application::fix_crlf(files.as_slice())?;
    for file in &changed {
        println!("Fixed {}", file.display());
    }
    Ok(())
}
