use crate::error::PatchError;
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub fn read_file_content(path: &Path) -> Result<String, PatchError> {
    fs::read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces `path` with `content` through a synced temp file next to the
/// real file, so readers only ever see the old or the new content.
///
/// Symlinks are resolved first and survive the write. The rename gives the
/// file a new inode owned by the current user, which detaches hard links.
/// When no temp file can be created beside the target (read-only directory)
/// the file is overwritten in place instead.
pub fn write_file_content(path: &Path, content: &str) -> Result<(), PatchError> {
    let write_err = |source: io::Error| PatchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).map_err(write_err)?;
    let permissions = fs::metadata(&target).map_err(write_err)?.permissions();
    let dir = target.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = match NamedTempFile::new_in(dir) {
        Ok(tmp) => tmp,
        Err(e) => {
            debug!("No temp file in {:?} ({}), overwriting {:?} in place", dir, e, target);
            return fs::write(&target, content).map_err(write_err);
        }
    };
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    fs::set_permissions(tmp.path(), permissions).map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    Ok(())
}
