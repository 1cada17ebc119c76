//! Filesystem probes shared by detection, merging and reconciliation
//!
//! `Path::exists` and friends turn every failure into `false`. The merge and
//! reconcile steps must not mistake a permission error for absence, so the
//! probes here only map `NotFound` to `Ok(false)` and hand every other error
//! back to the caller.

use std::fs;
use std::io;
use std::path::{Component, Path};

/// Kind of entry found at a path, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// Returns the entry kind at `path`, or `None` if nothing is there.
pub fn entry_type(path: &Path) -> io::Result<Option<FileType>> {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            let file_type = if meta.file_type().is_symlink() {
                FileType::Symlink
            } else if meta.is_dir() {
                FileType::Directory
            } else {
                FileType::File
            };
            Ok(Some(file_type))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Checks whether anything (file, directory or symlink) exists at `path`.
pub fn path_exists(path: &Path) -> io::Result<bool> {
    entry_type(path).map(|t| t.is_some())
}

/// Checks whether `path` is a directory, following symlinks.
pub fn dir_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Checks whether `path` is a regular file, following symlinks.
pub fn file_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Writes `data` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)
}

/// True if `name` is exactly one normal path component: not empty, not `.`
/// or `..`, and free of separators.
pub fn is_single_component(name: &str) -> bool {
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == name
    )
}
