// src/output/writer.rs
//! The file I/O behind the sinks and the state file.
//!
//! Every function here creates missing parent directories first.

use crate::error::AppError;
use std::fs::{self, File, OpenOptions};
use std::path::Path;

/// Creates the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::OutputWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Opens `path` for writing, truncating it unless `append` is set.
pub fn open_output(path: &Path, append: bool) -> Result<File, AppError> {
    ensure_parent_dir(path)?;
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    log::debug!(
        "Opening {} ({})",
        path.display(),
        if append { "append" } else { "truncate" }
    );
    options.open(path).map_err(|source| AppError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `content` to `path` in one go.
pub fn write_file(path: &Path, content: &str, append: bool) -> Result<usize, AppError> {
    use std::io::Write;

    log::debug!("Writing {} bytes to {}", content.len(), path.display());
    let mut file = open_output(path, append)?;
    file.write_all(content.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}
