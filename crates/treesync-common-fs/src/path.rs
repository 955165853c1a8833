//! Path manipulation utilities.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` without hitting the filesystem.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => components.push(Component::Prefix(p)),
            Component::RootDir => {
                components.clear();
                components.push(Component::RootDir);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(last) = components.last() {
                    match last {
                        Component::Normal(_) => {
                            components.pop();
                        }
                        Component::ParentDir => {
                            components.push(Component::ParentDir);
                        }
                        _ => {} // Don't pop prefix or root dir
                    }
                } else {
                    components.push(Component::ParentDir);
                }
            }
            Component::Normal(c) => components.push(Component::Normal(c)),
        }
    }

    if components.is_empty() {
        PathBuf::from(".")
    } else {
        components.iter().collect()
    }
}

/// Resolve a path against `base` (when relative) and normalize it.
pub fn absolute_from(path: impl AsRef<Path>, base: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(base.as_ref().join(path))
    }
}

/// Resolve a path against the current directory and normalize it.
pub fn absolute(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(absolute_from(path, cwd))
}

/// Join a single path segment onto `base`, rejecting anything that is not
/// a plain name (absolute paths, separators, `.` or `..`).
pub fn join_name(base: impl AsRef<Path>, name: &str) -> Option<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(base.as_ref().join(name)),
        _ => None,
    }
}

/// Last component of a path as a string.
pub fn file_name_string(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
