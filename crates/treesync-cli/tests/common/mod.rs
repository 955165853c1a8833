//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use treesync_test_utils::TreeFixture;

/// A project tree plus a working directory to run the binary from.
pub struct TestContext {
    pub tree: TreeFixture,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new<S: AsRef<str>>(root_name: &str, projects: &[S]) -> Self {
        let tree = TreeFixture::with_projects(root_name, projects);
        let config_path = tree.root().with_file_name("treesync.yaml");
        Self { tree, config_path }
    }

    /// Write a config file next to the tree
    pub fn with_config(self, config: &str) -> Self {
        std::fs::write(&self.config_path, config).expect("Failed to write config");
        self
    }

    /// The processed directory
    pub fn root(&self) -> &Path {
        self.tree.root()
    }

    /// Create a command that runs from the tree's parent directory
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("treesync").expect("Binary not found");
        let workdir = self.root().parent().expect("fixture root has a parent");
        cmd.current_dir(workdir)
            .env_remove("TREESYNC_CONFIG")
            .env_remove("TREESYNC_PREFIX_ORIGIN")
            .env_remove("TREESYNC_GLOB")
            .env_remove("TREESYNC_LINK_TARGET")
            .env_remove("TREESYNC_PUSH")
            .env_remove("TREESYNC_NO_VCS")
            .env_remove("TREESYNC_LOG_FILE")
            .env_remove("TREESYNC_LOG_LEVEL")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

/// Assert helpers for CLI output
pub trait OutputAssertions {
    fn assert_success(&self);
    fn assert_exit_code(&self, code: i32);
    fn assert_stdout_contains(&self, text: &str);
    fn assert_stderr_contains(&self, text: &str);
}

impl OutputAssertions for Output {
    fn assert_success(&self) {
        assert!(
            self.status.success(),
            "Command failed with status: {}\nstderr: {}",
            self.status,
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {}, got {:?}\nstderr: {}",
            code,
            self.status.code(),
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn assert_stdout_contains(&self, text: &str) {
        let stdout = String::from_utf8_lossy(&self.stdout);
        assert!(
            stdout.contains(text),
            "stdout did not contain '{text}'\nstdout: {stdout}"
        );
    }

    fn assert_stderr_contains(&self, text: &str) {
        let stderr = String::from_utf8_lossy(&self.stderr);
        assert!(
            stderr.contains(text),
            "stderr did not contain '{text}'\nstderr: {stderr}"
        );
    }
}

/// JSON output assertions
pub mod json {
    use serde_json::Value;

    pub fn parse_output(output: &[u8]) -> Value {
        serde_json::from_slice(output).expect("Failed to parse JSON output")
    }

    pub fn assert_error(json: &Value, code: &str) {
        assert_eq!(json["success"].as_bool(), Some(false));
        assert_eq!(json["error"]["code"].as_str(), Some(code), "Expected error code: {code}");
    }
}
