//! Local File System Implementation
//!
//! Reads and atomic writes for artifacts Rigger regenerates in place.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::RiggerResult;

/// Local file system access
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &Path) -> RiggerResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Write content atomically
    ///
    /// The content goes to a temp file in the destination directory which is
    /// then renamed over `path`, so readers never observe a partial file.
    pub fn write_atomic(&self, path: &Path, content: &str) -> RiggerResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
