//! Test utilities for Treesync crates.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// A throwaway parent directory with sub-project directories inside it.
///
/// The parent lives one level below the temp dir so it has a stable,
/// caller-chosen name (the name feeds the descriptors' grouping label).
pub struct TreeFixture {
    _temp: TempDir,
    root: PathBuf,
}

impl TreeFixture {
    /// Create an empty root directory called `root_name`.
    pub fn new(root_name: &str) -> Self {
        let temp = temp_dir();
        let root = temp.path().join(root_name);
        fs::create_dir(&root).expect("Failed to create fixture root");
        Self { _temp: temp, root }
    }

    /// Create a root holding one sub-project per name, each with a `main.cpp`.
    pub fn with_projects<S: AsRef<str>>(root_name: &str, names: &[S]) -> Self {
        let fixture = Self::new(root_name);
        for name in names {
            fixture.add_project(name.as_ref());
        }
        fixture
    }

    /// Add one sub-project directory with a source file.
    pub fn add_project(&self, name: &str) -> PathBuf {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir).expect("Failed to create project dir");
        fs::write(dir.join("main.cpp"), format!("// {name}\nint main() {{ return 0; }}\n"))
            .expect("Failed to write source file");
        dir
    }

    /// Add a plain file directly under the root.
    pub fn add_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sorted names of the directories currently under the root.
    pub fn dir_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.root)
            .expect("Failed to read fixture root")
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Read a file relative to the root.
    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        fs::read_to_string(self.root.join(relative)).expect("Failed to read fixture file")
    }
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
