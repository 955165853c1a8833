//! Environment variable handling.

use std::env;
use thiserror::Error;

use crate::types::TreesyncConfig;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    // Configuration
    pub const TREESYNC_CONFIG: &str = "TREESYNC_CONFIG";
    pub const TREESYNC_PREFIX_ORIGIN: &str = "TREESYNC_PREFIX_ORIGIN";
    pub const TREESYNC_GLOB: &str = "TREESYNC_GLOB";
    pub const TREESYNC_LINK_TARGET: &str = "TREESYNC_LINK_TARGET";
    pub const TREESYNC_PUSH: &str = "TREESYNC_PUSH";
    pub const TREESYNC_NO_VCS: &str = "TREESYNC_NO_VCS";

    // Logging
    pub const TREESYNC_LOG_LEVEL: &str = "TREESYNC_LOG_LEVEL";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Environment configuration.
pub struct Environment {
    _guard: (), // Prevent construction outside module
}

impl Environment {
    /// Initialize environment from .env files.
    pub fn init() -> Result<Self, EnvError> {
        // Later files override earlier ones
        let _ = dotenvy::from_filename(".env");
        let _ = dotenvy::from_filename_override(".env.local");

        Ok(Self { _guard: () })
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }

    /// Get a boolean variable.
    pub fn get_bool(var: &str) -> Option<bool> {
        Self::get(var).map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
    }

    /// Get an integer variable.
    pub fn get_int<T: std::str::FromStr>(var: &str) -> Result<Option<T>, EnvError> {
        match Self::get(var) {
            Some(v) => v.parse().map(Some).map_err(|_| EnvError::InvalidValue {
                var: var.to_string(),
                message: format!("expected integer, got `{v}`"),
            }),
            None => Ok(None),
        }
    }

    /// Apply `TREESYNC_*` overrides onto a loaded configuration.
    pub fn apply_overrides(config: &mut TreesyncConfig) -> Result<(), EnvError> {
        if let Some(origin) = Self::get_int::<u8>(vars::TREESYNC_PREFIX_ORIGIN)? {
            config.naming.prefix_origin = origin;
        }
        if let Some(glob) = Self::get(vars::TREESYNC_GLOB) {
            config.descriptor.glob_pattern = glob;
        }
        if let Some(link) = Self::get(vars::TREESYNC_LINK_TARGET) {
            config.descriptor.link_target = link;
        }
        if let Some(push) = Self::get_bool(vars::TREESYNC_PUSH) {
            config.vcs.push = push;
        }
        if let Some(true) = Self::get_bool(vars::TREESYNC_NO_VCS) {
            config.vcs.enabled = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_counts_as_unset() {
        assert_eq!(Environment::get("TREESYNC_NONEXISTENT_VAR_12345"), None);
        env::set_var("TREESYNC_TEST_EMPTY", "");
        assert_eq!(Environment::get("TREESYNC_TEST_EMPTY"), None);
        env::remove_var("TREESYNC_TEST_EMPTY");
    }

    #[test]
    fn test_bool_parsing() {
        env::set_var("TREESYNC_TEST_BOOL", "true");
        assert_eq!(Environment::get_bool("TREESYNC_TEST_BOOL"), Some(true));
        env::set_var("TREESYNC_TEST_BOOL", "1");
        assert_eq!(Environment::get_bool("TREESYNC_TEST_BOOL"), Some(true));
        env::set_var("TREESYNC_TEST_BOOL", "false");
        assert_eq!(Environment::get_bool("TREESYNC_TEST_BOOL"), Some(false));
        env::remove_var("TREESYNC_TEST_BOOL");
    }

    #[test]
    fn test_int_parsing() {
        env::set_var("TREESYNC_TEST_INT", "abc");
        assert!(Environment::get_int::<u8>("TREESYNC_TEST_INT").is_err());
        env::set_var("TREESYNC_TEST_INT", "0");
        assert_eq!(Environment::get_int::<u8>("TREESYNC_TEST_INT").unwrap(), Some(0));
        env::remove_var("TREESYNC_TEST_INT");
        assert_eq!(Environment::get_int::<u8>("TREESYNC_TEST_INT").unwrap(), None);
    }

    #[test]
    fn test_overrides_apply() {
        env::set_var(vars::TREESYNC_PREFIX_ORIGIN, "0");
        env::set_var(vars::TREESYNC_LINK_TARGET, "support");
        env::set_var(vars::TREESYNC_NO_VCS, "yes");

        let mut config = TreesyncConfig::default();
        Environment::apply_overrides(&mut config).unwrap();

        env::remove_var(vars::TREESYNC_PREFIX_ORIGIN);
        env::remove_var(vars::TREESYNC_LINK_TARGET);
        env::remove_var(vars::TREESYNC_NO_VCS);

        assert_eq!(config.naming.prefix_origin, 0);
        assert_eq!(config.descriptor.link_target, "support");
        assert!(!config.vcs.enabled);
        assert_eq!(config.descriptor.glob_pattern, "*.cpp *.h");
    }
}
