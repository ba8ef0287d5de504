//! Filesystem helpers shared across `configify` modules.
//!
//! Paths are opened relative to an ambient directory handle for their parent,
//! so every file operation goes through `cap_std`.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::ConfigifyError;

/// Reports whether `path` names an existing directory.
///
/// # Errors
///
/// Returns [`ConfigifyError::Io`] when the path cannot be inspected, including
/// when it does not exist.
pub fn is_directory(path: &Utf8Path) -> Result<bool, ConfigifyError> {
    let Some(name) = path.file_name() else {
        // `.`, `..` and the root only ever name directories.
        return open_dir(path).map(|_| true);
    };
    let dir = open_dir(parent_or_current(path))?;
    dir.metadata(name)
        .map(|meta| meta.is_dir())
        .map_err(|source| io_error(path, source))
}

/// Reports whether `path` names an existing regular file.
#[must_use]
pub fn is_file(path: &Utf8Path) -> bool {
    path.file_name().is_some_and(|name| {
        Dir::open_ambient_dir(parent_or_current(path), ambient_authority())
            .is_ok_and(|dir| dir.is_file(name))
    })
}

/// Reads a UTF-8 file into memory.
///
/// # Errors
///
/// Returns [`ConfigifyError::Io`] when the file cannot be read.
pub fn read_to_string(path: &Utf8Path) -> Result<String, ConfigifyError> {
    let name = file_name(path)?;
    let dir = open_dir(parent_or_current(path))?;
    dir.read_to_string(name)
        .map_err(|source| io_error(path, source))
}

/// Writes `contents` to `path`, creating parent directories as needed and
/// replacing any existing file.
///
/// # Errors
///
/// Returns [`ConfigifyError::Io`] when a directory or the file cannot be
/// created or written.
pub fn write_file(path: &Utf8Path, contents: &str) -> Result<(), ConfigifyError> {
    let name = file_name(path)?;
    let dir = ensure_dir(parent_or_current(path))?;
    let mut file = dir
        .open_with(
            name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|source| io_error(path, source))?;
    file.write_all(contents.as_bytes())
        .map_err(|source| io_error(path, source))
}

/// Parent directory of `path`, or `.` for bare file names.
#[must_use]
pub fn parent_or_current(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

fn file_name(path: &Utf8Path) -> Result<&str, ConfigifyError> {
    path.file_name().ok_or_else(|| {
        io_error(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })
}

fn open_dir(path: &Utf8Path) -> Result<Dir, ConfigifyError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| io_error(path, source))
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, ConfigifyError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|source| io_error(path, source))?;
            open_dir(path)
        }
        Err(open_err) => Err(io_error(path, open_err)),
    }
}

fn io_error(path: &Utf8Path, source: std::io::Error) -> ConfigifyError {
    ConfigifyError::Io {
        path: path.to_path_buf(),
        source,
    }
}
