//! Error types for Treesync.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Stable, machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    pub const NOT_A_DIRECTORY: Self = Self("NOT_A_DIRECTORY");
    pub const OUT_OF_RANGE: Self = Self("OUT_OF_RANGE");
    pub const COLLISION: Self = Self("COLLISION");
    pub const RENAME_FAILED: Self = Self("RENAME_FAILED");
    pub const WRITE_FAILED: Self = Self("WRITE_FAILED");
    pub const FILE_NOT_FOUND: Self = Self("FILE_NOT_FOUND");
    pub const FILE_READ_ERROR: Self = Self("FILE_READ_ERROR");
    pub const FILE_WRITE_ERROR: Self = Self("FILE_WRITE_ERROR");
    pub const CONFIG_ERROR: Self = Self("CONFIG_ERROR");

    /// The code as a string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The main error type for Treesync operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The target root does not exist or is not a directory.
    #[error("`{}` is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// More siblings than the two-digit prefix can number.
    #[error("{count} subdirectories cannot be numbered with a two-digit prefix (at most {capacity})")]
    OutOfRange { count: usize, capacity: usize },

    /// Two subdirectories reduce to the same suffix.
    #[error("`{first}` and `{second}` both map to suffix `{suffix}`")]
    Collision {
        first: String,
        second: String,
        suffix: String,
    },

    /// A tracked move failed. `completed` lists the pairs already moved in this run.
    #[error("failed to rename `{old_name}` to `{new_name}`: {source}")]
    Rename {
        old_name: String,
        new_name: String,
        completed: Vec<(String, String)>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A build descriptor could not be written.
    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Lower-level filesystem error.
    #[error("{message}")]
    FileSystem {
        code: ErrorCode,
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotADirectory { .. } => ErrorCode::NOT_A_DIRECTORY,
            Self::OutOfRange { .. } => ErrorCode::OUT_OF_RANGE,
            Self::Collision { .. } => ErrorCode::COLLISION,
            Self::Rename { .. } => ErrorCode::RENAME_FAILED,
            Self::Write { .. } => ErrorCode::WRITE_FAILED,
            Self::FileSystem { code, .. } => *code,
            Self::Config(_) => ErrorCode::CONFIG_ERROR,
        }
    }

    /// True for errors raised while planning, before anything was mutated.
    pub fn is_planning(&self) -> bool {
        matches!(
            self,
            Self::NotADirectory { .. } | Self::OutOfRange { .. } | Self::Collision { .. }
        )
    }

    /// The path or name this error is about, if any.
    pub fn subject(&self) -> Option<String> {
        match self {
            Self::NotADirectory { path } | Self::Write { path, .. } => {
                Some(path.display().to_string())
            }
            Self::Collision { second, .. } => Some(second.clone()),
            Self::Rename { old_name, .. } => Some(old_name.clone()),
            Self::FileSystem { path, .. } => path.clone(),
            Self::OutOfRange { .. } | Self::Config(_) => None,
        }
    }
}

/// Result type alias using Treesync's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::NotADirectory {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(err.code(), ErrorCode::NOT_A_DIRECTORY);
        assert!(err.is_planning());
        assert_eq!(err.to_string(), "`/nope` is not a directory");

        let err = Error::OutOfRange {
            count: 100,
            capacity: 99,
        };
        assert_eq!(err.code().as_str(), "OUT_OF_RANGE");
        assert!(err.to_string().contains("at most 99"));
    }

    #[test]
    fn test_rename_error_keeps_context() {
        let err = Error::Rename {
            old_name: "b_proj".into(),
            new_name: "02_b_proj".into(),
            completed: vec![("a".into(), "01_a".into())],
            source: "target exists".into(),
        };
        assert!(!err.is_planning());
        assert_eq!(err.subject().as_deref(), Some("b_proj"));
        assert_eq!(
            err.to_string(),
            "failed to rename `b_proj` to `02_b_proj`: target exists"
        );
    }
}
