// Licensed under the Apache-2.0 license

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{BootImageError, BootImageResult};

/// Writes `contents` to `path` so that readers see either the old file or the
/// complete new one, never a partial write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> BootImageResult<()> {
    write_all_atomic(&[(path, contents)])
}

fn stage(path: &Path, contents: &[u8]) -> BootImageResult<NamedTempFile> {
    let io_err = |source| BootImageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(contents).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    Ok(tmp)
}

/// Writes a set of files that belong together. Every file is fully written
/// to a scratch file next to its destination before the first one is moved
/// into place, so a failed write leaves all destinations untouched.
pub fn write_all_atomic(files: &[(&Path, &[u8])]) -> BootImageResult<()> {
    let staged = files
        .iter()
        .map(|(path, contents)| -> BootImageResult<_> { Ok((*path, stage(path, contents)?)) })
        .collect::<BootImageResult<Vec<_>>>()?;
    for (path, tmp) in staged {
        tmp.persist(path).map_err(|e| BootImageError::Io {
            path: path.to_path_buf(),
            source: e.error,
        })?;
    }
    Ok(())
}
