//! Filesystem helpers for staging project directories.
//!
//! Both helpers treat a missing path as a no-op rather than an error so
//! fixtures can run them before and after a test without checking state.
//! They are blocking `std::fs` calls.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::FsError;

/// List the immediate children of each folder in `folders`.
///
/// Existing directories expand to their entries joined onto the folder path,
/// in the order the filesystem yields them. Paths that do not exist are
/// passed through unchanged. The listing is one level deep.
///
/// # Errors
///
/// Returns [`FsError::ReadDir`] if an existing path cannot be listed,
/// including when it is not a directory.
///
/// # Examples
///
/// ```no_run
/// use cli_project::fs::folder_content;
///
/// let entries = folder_content(&["out", "missing"]).expect("list folders");
/// assert!(entries.iter().any(|p| p.ends_with("missing")));
/// ```
pub fn folder_content<P: AsRef<Path>>(folders: &[P]) -> Result<Vec<PathBuf>, FsError> {
    let mut out = Vec::new();
    for folder in folders {
        let folder = folder.as_ref();
        if !folder.exists() {
            out.push(folder.to_path_buf());
            continue;
        }
        let read_err = |source| FsError::ReadDir {
            path: folder.to_path_buf(),
            source,
        };
        for entry in fs::read_dir(folder).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            out.push(folder.join(entry.file_name()));
        }
    }
    Ok(out)
}

/// Remove a file or directory at `path`.
///
/// Directories are removed recursively. Symlinks are removed without
/// following them. A missing path is left alone, so repeated calls succeed.
///
/// # Errors
///
/// Returns [`FsError::Remove`] when the path exists but cannot be removed.
pub fn remove_path(path: impl AsRef<Path>) -> Result<(), FsError> {
    let path = path.as_ref();
    let remove_err = |source| FsError::Remove {
        path: path.to_path_buf(),
        source,
    };
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(remove_err(e)),
    };
    let res = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match res {
        // Lost a race with another remover; the path is gone either way.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other.map_err(remove_err),
    }
}

/// Remove every path in `paths`, stopping at the first failure.
///
/// # Errors
///
/// Propagates the first [`FsError::Remove`] encountered.
pub fn remove_paths<I>(paths: I) -> Result<(), FsError>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    for path in paths {
        let path = path.as_ref();
        remove_path(path)?;
        tracing::trace!(path = %path.display(), "removed");
    }
    Ok(())
}
