//! Git repository detection.

use crate::{VcsError, VcsResult};
use git2::Repository;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Repository information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Path to the work tree root.
    pub root_path: PathBuf,
    /// Is this a bare repository.
    pub is_bare: bool,
}

/// Detect a Git repository containing `path`.
pub fn detect_repo(path: impl AsRef<Path>) -> VcsResult<Option<RepoInfo>> {
    match Repository::discover(path.as_ref()) {
        Ok(repo) => Ok(Some(extract_repo_info(&repo))),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(VcsError::Git2(e)),
    }
}

fn extract_repo_info(repo: &Repository) -> RepoInfo {
    let root_path = repo
        .workdir()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| repo.path().to_path_buf());

    RepoInfo {
        root_path,
        is_bare: repo.is_bare(),
    }
}
