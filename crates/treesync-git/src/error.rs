//! Version-control error types.

use thiserror::Error;

/// Version-control operation error.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The tool could not be started at all.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Command line that was attempted.
        command: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and exited unsuccessfully.
    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        /// Command line that failed.
        command: String,
        /// Exit status description.
        status: String,
        /// Trimmed standard error.
        stderr: String,
    },

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git2 library error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// Failure requested through [`crate::RecordingGateway`].
    #[error("injected failure: {0}")]
    Injected(String),
}

/// Result type for version-control operations.
pub type VcsResult<T> = Result<T, VcsError>;

impl VcsError {
    /// Check if this error came from the tool's exit status rather than from
    /// being unable to run it.
    pub fn is_command_failure(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }
}
