//! Filesystem utilities.
//!
//! Helper functions for file operations.

use std::path::Path;

use filetime::FileTime;

use crate::error::Result;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Copy `source` to `target`, carrying over the source modification time.
///
/// Returns the byte size of the written target, read back from its own
/// metadata rather than the source's.
pub fn copy_with_mtime(source: &Path, target: &Path) -> Result<u64> {
    std::fs::copy(source, target)?;

    let source_meta = std::fs::metadata(source)?;
    let mtime = FileTime::from_last_modification_time(&source_meta);
    filetime::set_file_mtime(target, mtime)?;

    Ok(std::fs::metadata(target)?.len())
}
