//! Configuration types.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreesyncConfig {
    /// Prefix numbering.
    pub naming: NamingConfig,
    /// Directory scanning.
    pub scan: ScanConfig,
    /// Build descriptor templates.
    pub descriptor: DescriptorConfig,
    /// Version-control bookkeeping.
    pub vcs: VcsConfig,
}

/// Prefix numbering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Number given to the first directory (0 or 1).
    pub prefix_origin: u8,
    /// Separator placed between a new prefix and an unprefixed name.
    pub separator: char,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix_origin: 1,
            separator: '_',
        }
    }
}

/// Directory scanning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob patterns of directory names that are never treated as sub-projects.
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: vec![".*".to_string()],
        }
    }
}

/// Build descriptor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorConfig {
    /// Descriptor file name written at the root and in every leaf.
    pub file_name: String,
    /// Space separated, non-recursive source glob.
    pub glob_pattern: String,
    /// Shared support library every leaf links against.
    pub link_target: String,
    /// Include directories listed in every leaf.
    pub include_dirs: Vec<String>,
    /// Lines written above the `add_subdirectory` list.
    pub aggregate_preamble: Vec<String>,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            file_name: "CMakeLists.txt".to_string(),
            glob_pattern: "*.cpp *.h".to_string(),
            link_target: "utilities".to_string(),
            include_dirs: vec!["${CMAKE_SOURCE_DIR}".to_string()],
            aggregate_preamble: Vec::new(),
        }
    }
}

/// Version-control configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcsConfig {
    /// Route renames and bookkeeping through git.
    pub enabled: bool,
    /// Stage and commit after a run that changed something.
    pub commit: bool,
    /// Push after committing.
    pub push: bool,
    pub remote: String,
    pub branch: String,
    /// Git executable.
    pub git_binary: String,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            commit: true,
            push: false,
            remote: "origin".to_string(),
            branch: "master".to_string(),
            git_binary: "git".to_string(),
        }
    }
}
