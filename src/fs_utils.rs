use crate::error::{Result, TransfindError};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reads a file and decodes it lossily, so stray binary files in a template tree
/// still go through the matcher instead of failing the whole walk.
///
/// # Errors
///
/// Returns `TransfindError::Io` if the file can't be read.
pub fn read_file_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Validates the templates root and strips any trailing separator.
///
/// # Errors
///
/// Returns `TransfindError::RootNotFound` if the path is neither a file nor a directory.
pub fn normalize_root(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(TransfindError::RootNotFound {
            path: path.to_path_buf(),
        });
    }

    Ok(path.components().collect())
}

/// Loads the catalog text.
///
/// A missing catalog is treated as empty. With `create_if_missing` it is also
/// created on disk, otherwise the filesystem is left untouched.
///
/// # Errors
///
/// Returns `TransfindError::CatalogUnreadable` if the catalog exists but can't be
/// read, or if it has to be created and that fails.
pub fn read_catalog(path: &Path, create_if_missing: bool) -> Result<String> {
    if !path.exists() {
        if create_if_missing {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| TransfindError::CatalogUnreadable {
                    path: path.to_path_buf(),
                    source,
                })?;
            tracing::info!(catalog = %path.display(), "created empty catalog");
        }
        return Ok(String::new());
    }

    let bytes = fs::read(path).map_err(|source| TransfindError::CatalogUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Appends `blob` to the end of the catalog. Existing content is never rewritten.
///
/// # Errors
///
/// Returns `TransfindError::CatalogUnwritable` if the catalog can't be opened or written.
pub fn append_to_catalog(path: &Path, blob: &str) -> Result<()> {
    let unwritable = |source: std::io::Error| TransfindError::CatalogUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(unwritable)?;
    file.write_all(blob.as_bytes()).map_err(unwritable)?;
    file.flush().map_err(unwritable)
}
