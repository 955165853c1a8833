//! File system utilities for Treesync.

pub mod path;

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use treesync_common_core::{Error, ErrorCode, Result};

fn fs_error(code: ErrorCode, message: String, path: &Path, e: io::Error) -> Error {
    Error::FileSystem {
        code,
        message,
        path: Some(path.to_string_lossy().to_string()),
        source: Some(Box::new(e)),
    }
}

/// Read a file to string with size limit.
pub fn read_to_string(path: impl AsRef<Path>, max_size: usize) -> Result<String> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => fs_error(
            ErrorCode::FILE_NOT_FOUND,
            format!("file not found: {}", path.display()),
            path,
            e,
        ),
        io::ErrorKind::PermissionDenied => fs_error(
            ErrorCode::FILE_READ_ERROR,
            format!("permission denied: {}", path.display()),
            path,
            e,
        ),
        _ => fs_error(
            ErrorCode::FILE_READ_ERROR,
            format!("failed to read metadata: {}", path.display()),
            path,
            e,
        ),
    })?;

    if metadata.len() as usize > max_size {
        return Err(Error::FileSystem {
            code: ErrorCode::FILE_READ_ERROR,
            message: format!("file too large: {} bytes (max: {})", metadata.len(), max_size),
            path: Some(path.to_string_lossy().to_string()),
            source: None,
        });
    }

    fs::read_to_string(path).map_err(|e| {
        fs_error(
            ErrorCode::FILE_READ_ERROR,
            format!("failed to read file: {}", path.display()),
            path,
            e,
        )
    })
}

/// Read a file if it exists; `None` when it does not.
pub fn read_if_exists(path: impl AsRef<Path>, max_size: usize) -> Result<Option<String>> {
    match read_to_string(path, max_size) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.code() == ErrorCode::FILE_NOT_FOUND => Ok(None),
        Err(e) => Err(e),
    }
}

/// Removes the temporary file unless the write was committed.
struct TempGuard {
    path: PathBuf,
    committed: bool,
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Write to a file atomically (write to temp, then rename).
///
/// Either the full contents end up at `path` or the previous file is left
/// untouched; the temporary file is removed on every failure path. An
/// existing read-only target is refused rather than replaced.
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Ok(metadata) = fs::metadata(path) {
        if metadata.permissions().readonly() {
            return Err(fs_error(
                ErrorCode::FILE_WRITE_ERROR,
                format!("target is read-only: {}", path.display()),
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only file"),
            ));
        }
    }

    let mut temp_path = path.to_path_buf();
    if let Some(name) = path.file_name() {
        let temp_name = format!(".{}.tmp", name.to_string_lossy());
        temp_path.set_file_name(temp_name);
    } else {
        temp_path.push(".tmp");
    }

    let mut guard = TempGuard {
        path: temp_path.clone(),
        committed: false,
    };

    {
        let mut file = File::create(&temp_path).map_err(|e| {
            fs_error(
                ErrorCode::FILE_WRITE_ERROR,
                format!("failed to create temporary file: {}", temp_path.display()),
                &temp_path,
                e,
            )
        })?;

        file.write_all(contents).map_err(|e| {
            fs_error(
                ErrorCode::FILE_WRITE_ERROR,
                format!("failed to write to temporary file: {}", temp_path.display()),
                &temp_path,
                e,
            )
        })?;

        file.sync_all().map_err(|e| {
            fs_error(
                ErrorCode::FILE_WRITE_ERROR,
                format!("failed to sync temporary file: {}", temp_path.display()),
                &temp_path,
                e,
            )
        })?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        fs_error(
            ErrorCode::FILE_WRITE_ERROR,
            format!("failed to rename temporary file to target: {}", path.display()),
            path,
            e,
        )
    })?;
    guard.committed = true;

    Ok(())
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Check if path is a directory.
pub fn is_dir(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// List the names of the immediate subdirectories of `dir`, sorted
/// lexicographically by their string value.
pub fn list_dir_names(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let mut names = Vec::new();

    let read_dir = fs::read_dir(dir).map_err(|e| {
        fs_error(
            ErrorCode::FILE_READ_ERROR,
            format!("failed to read directory: {}", dir.display()),
            dir,
            e,
        )
    })?;

    for entry in read_dir {
        let entry = entry.map_err(|e| {
            fs_error(
                ErrorCode::FILE_READ_ERROR,
                format!("failed to read directory entry: {}", dir.display()),
                dir,
                e,
            )
        })?;

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().into_string().map_err(|raw| Error::FileSystem {
            code: ErrorCode::FILE_READ_ERROR,
            message: format!("directory name is not valid UTF-8: {}", raw.to_string_lossy()),
            path: Some(path.to_string_lossy().to_string()),
            source: None,
        })?;
        names.push(name);
    }

    names.sort();
    Ok(names)
}
