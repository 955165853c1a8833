//! Untracked fallback gateway.

use std::path::Path;

use crate::{VcsResult, VersionControlGateway};

/// Renames with the filesystem and skips all history bookkeeping.
///
/// Used when version control is disabled or the root is not inside a work tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFs;

impl VersionControlGateway for PlainFs {
    fn name(&self) -> &'static str {
        "plain-fs"
    }

    fn tracked_move(&self, root: &Path, from: &str, to: &str) -> VcsResult<()> {
        std::fs::rename(root.join(from), root.join(to))?;
        Ok(())
    }

    fn stage_all(&self, _root: &Path) -> VcsResult<()> {
        Ok(())
    }

    fn commit(&self, _root: &Path, _message: &str) -> VcsResult<()> {
        Ok(())
    }

    fn push(&self, _root: &Path, _remote: &str, _branch: &str) -> VcsResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_move() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("b_proj")).unwrap();

        PlainFs.tracked_move(dir.path(), "b_proj", "02_b_proj").unwrap();

        assert!(!dir.path().join("b_proj").exists());
        assert!(dir.path().join("02_b_proj").is_dir());
        assert!(PlainFs.commit(dir.path(), "msg").is_ok());
    }
}
