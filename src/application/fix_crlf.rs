//! Carriage-return fix
//!
//! Rewrites files with every `\r` removed.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RiggerResult;
use crate::infrastructure::fs::LocalFs;

/// Strip carriage returns from each file. Returns the files that changed.
pub fn fix_crlf<P: AsRef<Path>>(files: &[P]) -> RiggerResult<Vec<PathBuf>> {
    let fs = LocalFs::new();
    let mut changed = Vec::new();

    for file in files {
        let file = file.as_ref();
        let content = fs.read(file)?;
        if !content.contains('\r') {
            debug!(path = %file.display(), "no carriage returns");
            continue;
        }

        fs.write_atomic(file, &content.replace('\r', ""))?;
        changed.push(file.to_path_buf());
    }

    Ok(changed)
}
