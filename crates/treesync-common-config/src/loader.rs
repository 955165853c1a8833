//! Configuration file loading and parsing.

use crate::types::TreesyncConfig;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// Location of the project-local config file, relative to the base directory.
pub const CONFIG_FILE: &str = ".treesync/config.yaml";

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Load configuration from `.treesync/config.yaml`, or defaults when absent.
    pub fn load(&self) -> Result<TreesyncConfig, ConfigError> {
        let config_path = self.base_path.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(TreesyncConfig::default());
        }

        self.load_file(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<TreesyncConfig, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let config: TreesyncConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    ///
    /// Unset `CMAKE_*` names are left verbatim so CMake variables can be
    /// written directly into descriptor settings.
    pub(crate) fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        static ENV_PATTERN: OnceLock<regex::Regex> = OnceLock::new();
        let re = ENV_PATTERN.get_or_init(|| {
            regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("valid env pattern")
        });

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None if var_name.starts_with("CMAKE_") => continue,
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }
}

/// Validate configuration values.
pub fn validate(config: &TreesyncConfig) -> Result<(), ConfigError> {
    if config.naming.prefix_origin > 1 {
        return Err(ConfigError::invalid("naming.prefix_origin must be 0 or 1"));
    }

    let sep = config.naming.separator;
    if sep.is_ascii_digit() || sep == '/' || sep == '\\' || sep.is_whitespace() {
        return Err(ConfigError::invalid(format!(
            "naming.separator `{sep}` must not be a digit, whitespace or path separator"
        )));
    }

    for pattern in &config.scan.exclude {
        glob::Pattern::new(pattern).map_err(|e| {
            ConfigError::invalid(format!("scan.exclude pattern `{pattern}` is invalid: {e}"))
        })?;
    }

    let descriptor = &config.descriptor;
    let file_name = descriptor.file_name.as_str();
    if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name == "." || file_name == ".." {
        return Err(ConfigError::invalid(format!(
            "descriptor.file_name `{file_name}` must be a plain file name"
        )));
    }

    if descriptor.glob_pattern.trim().is_empty() {
        return Err(ConfigError::invalid("descriptor.glob_pattern must not be empty"));
    }
    for token in descriptor.glob_pattern.split_whitespace() {
        if token.contains('/') || token.contains("**") {
            return Err(ConfigError::invalid(format!(
                "descriptor.glob_pattern `{token}` must match files directly inside the leaf"
            )));
        }
        glob::Pattern::new(token).map_err(|e| {
            ConfigError::invalid(format!("descriptor.glob_pattern `{token}` is invalid: {e}"))
        })?;
    }

    if descriptor.link_target.is_empty() || descriptor.link_target.contains(char::is_whitespace) {
        return Err(ConfigError::invalid(
            "descriptor.link_target must be a single non-empty name",
        ));
    }

    if config.vcs.remote.trim().is_empty() || config.vcs.branch.trim().is_empty() {
        return Err(ConfigError::invalid("vcs.remote and vcs.branch must not be empty"));
    }

    Ok(())
}
