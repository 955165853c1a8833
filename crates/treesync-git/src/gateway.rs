//! The capability the tree pipeline needs from version control.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::VcsResult;

/// Narrow version-control capability.
///
/// Every operation takes the processed root explicitly; implementations run
/// their work relative to it and never change the process working directory.
pub trait VersionControlGateway {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Move `root/from` to `root/to` so that history follows the files.
    fn tracked_move(&self, root: &Path, from: &str, to: &str) -> VcsResult<()>;

    /// Stage every change below `root`.
    fn stage_all(&self, root: &Path) -> VcsResult<()>;

    /// Commit what is staged. Having nothing to commit is not an error.
    fn commit(&self, root: &Path, message: &str) -> VcsResult<()>;

    /// Push `branch` to `remote`.
    fn push(&self, root: &Path, remote: &str, branch: &str) -> VcsResult<()>;
}

/// A recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum VcsOp {
    /// `tracked_move(from, to)`
    Move {
        /// Old name.
        from: String,
        /// New name.
        to: String,
    },
    /// `stage_all()`
    Stage,
    /// `commit(message)`
    Commit {
        /// Commit message.
        message: String,
    },
    /// `push(remote, branch)`
    Push {
        /// Remote name.
        remote: String,
        /// Branch name.
        branch: String,
    },
}
