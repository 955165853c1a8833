//! Version-control integration for Treesync.
//!
//! The rest of the workspace only talks to [`VersionControlGateway`]. Renames
//! that must keep file history go through [`GitCli`], which shells out to the
//! `git` binary; [`PlainFs`] is the untracked fallback and
//! [`RecordingGateway`] is an in-memory double for tests.

#![warn(missing_docs)]

pub mod detect;
pub mod error;
pub mod gateway;
pub mod git_cli;
pub mod plain;
pub mod recording;

pub use detect::{detect_repo, RepoInfo};
pub use error::{VcsError, VcsResult};
pub use gateway::{VcsOp, VersionControlGateway};
pub use git_cli::GitCli;
pub use plain::PlainFs;
pub use recording::RecordingGateway;

// Re-export git2 for callers that need repository access in tests.
pub use git2;
