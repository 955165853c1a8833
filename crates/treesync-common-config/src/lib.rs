//! Configuration types for Treesync.
//!
//! This crate provides the configuration used by Treesync, read from
//! `.treesync/config.yaml` files or an explicit path, with environment
//! overrides applied on top.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_sensible_values() {
        let config = TreesyncConfig::default();

        assert_eq!(config.naming.prefix_origin, 1);
        assert_eq!(config.naming.separator, '_');

        assert_eq!(config.scan.exclude, vec![".*".to_string()]);

        assert_eq!(config.descriptor.file_name, "CMakeLists.txt");
        assert_eq!(config.descriptor.glob_pattern, "*.cpp *.h");
        assert_eq!(config.descriptor.link_target, "utilities");
        assert_eq!(config.descriptor.include_dirs, vec!["${CMAKE_SOURCE_DIR}".to_string()]);
        assert!(config.descriptor.aggregate_preamble.is_empty());

        assert!(config.vcs.enabled);
        assert!(config.vcs.commit);
        assert!(!config.vcs.push);
        assert_eq!(config.vcs.remote, "origin");
        assert_eq!(config.vcs.branch, "master");
        assert_eq!(config.vcs.git_binary, "git");
    }

    #[test]
    fn test_config_serializes_to_yaml() {
        let yaml = serde_yaml::to_string(&TreesyncConfig::default()).unwrap();

        assert!(yaml.contains("naming:"));
        assert!(yaml.contains("descriptor:"));
        assert!(yaml.contains("vcs:"));
        assert!(yaml.contains("prefix_origin: 1"));
        assert!(yaml.contains("link_target: utilities"));
    }

    #[test]
    fn test_partial_configs_merge_with_defaults() {
        let partial_yaml = r#"
naming:
  prefix_origin: 0
descriptor:
  glob_pattern: "*.cpp *.h *.txt"
"#;

        let config: TreesyncConfig = serde_yaml::from_str(partial_yaml).unwrap();

        assert_eq!(config.naming.prefix_origin, 0);
        assert_eq!(config.descriptor.glob_pattern, "*.cpp *.h *.txt");

        assert_eq!(config.naming.separator, '_');
        assert_eq!(config.descriptor.link_target, "utilities");
        assert!(config.vcs.enabled);
    }
}
