use crate::error::WriteError;
use log::debug;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `contents` to `path`, replacing any existing file atomically.
///
/// The text goes to a temporary file in the destination directory which is
/// restricted to the owner (0600 on Unix), flushed, synced, then renamed
/// over `path`. On failure the temporary file is removed and `path` is left
/// untouched.
///
/// # Errors
///
/// Returns a `WriteError` if the destination directory is missing or not
/// writable, or if writing, syncing or renaming fails.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), WriteError> {
    if path.file_name().is_none() {
        return Err(WriteError::InvalidDestination {
            path: path.to_path_buf(),
        });
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(".invssh-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|source| WriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;

    let write_err = |source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    };
    restrict_permissions(file.as_file()).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;

    persist(file, path)?;
    debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

fn persist(file: NamedTempFile, path: &Path) -> Result<(), WriteError> {
    file.persist(path)
        .map(drop)
        .map_err(|e| WriteError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> std::io::Result<()> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}
