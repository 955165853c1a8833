//! CLI error handling and exit codes.

use std::io;
use std::process::ExitCode;

use thiserror::Error;
use treesync_common_config::{ConfigError, EnvError};

/// Application exit codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    NotADirectory = 4,
    PlanRejected = 5,
    RenameFailed = 6,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Tree(#[from] treesync_common_core::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Stable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "CONFIG_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Tree(e) => e.code().as_str(),
            Self::Other(_) => "ERROR",
        }
    }

    /// Exit status for this error
    pub fn exit(&self) -> Exit {
        use treesync_common_core::Error as TreeError;

        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Tree(e) => match e {
                TreeError::NotADirectory { .. } => Exit::NotADirectory,
                TreeError::OutOfRange { .. } | TreeError::Collision { .. } => Exit::PlanRejected,
                TreeError::Rename { .. } => Exit::RenameFailed,
                TreeError::Write { .. } | TreeError::FileSystem { .. } => Exit::IoError,
                TreeError::Config(_) => Exit::ConfigError,
            },
            Self::Other(_) => Exit::GeneralError,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit().into()
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        use treesync_common_core::Error as TreeError;

        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::Tree(TreeError::OutOfRange { .. }) => {
                Some("split the directory; a two-digit prefix numbers at most 99 (100 from 00)")
            }
            Self::Tree(TreeError::Collision { .. }) => {
                Some("rename one of the directories so every suffix is unique")
            }
            Self::Tree(TreeError::Rename { .. }) => {
                Some("completed moves were kept; fix the cause and run again")
            }
            _ => None,
        }
    }

    /// Directory, file or name the error is about
    pub fn subject(&self) -> Option<String> {
        match self {
            Self::Tree(e) => e.subject(),
            _ => None,
        }
    }

    /// Pairs already moved when a rename failed
    pub fn completed_moves(&self) -> &[(String, String)] {
        match self {
            Self::Tree(treesync_common_core::Error::Rename { completed, .. }) => completed,
            _ => &[],
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::ParseError { .. } => Some("check the YAML syntax".to_string()),
            ConfigError::NotFound { .. } => Some("pass an existing file to --config".to_string()),
            _ => None,
        };
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint,
        }
    }
}

impl From<EnvError> for CliError {
    fn from(err: EnvError) -> Self {
        Self::Config {
            message: format!("Environment error: {err}"),
            source: Some(Box::new(err)),
            hint: None,
        }
    }
}
