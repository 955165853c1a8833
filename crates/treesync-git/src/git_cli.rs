//! Gateway backed by the `git` command-line tool.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::{VcsError, VcsResult, VersionControlGateway};

/// Runs `git` subcommands with the processed root as their working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
}

impl GitCli {
    /// Use the given executable.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Check that the executable can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.binary.display(), args.join(" "))
    }

    fn output(&self, root: &Path, args: &[&str]) -> VcsResult<Output> {
        let command = self.describe(args);
        debug!(%command, root = %root.display(), "running git");

        Command::new(&self.binary)
            .args(args)
            .current_dir(root)
            .output()
            .map_err(|source| VcsError::Spawn { command, source })
    }

    fn run(&self, root: &Path, args: &[&str]) -> VcsResult<Output> {
        let output = self.output(root, args)?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(VcsError::CommandFailed {
                command: self.describe(args),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl VersionControlGateway for GitCli {
    fn name(&self) -> &'static str {
        "git"
    }

    fn tracked_move(&self, root: &Path, from: &str, to: &str) -> VcsResult<()> {
        self.run(root, &["mv", "--", from, to]).map(|_| ())
    }

    fn stage_all(&self, root: &Path) -> VcsResult<()> {
        self.run(root, &["add", "-A", "--", "."]).map(|_| ())
    }

    fn commit(&self, root: &Path, message: &str) -> VcsResult<()> {
        let args = ["commit", "-m", message];
        let output = self.output(root, &args)?;
        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        // "nothing to commit" is not really an error
        if stdout.contains("nothing to commit") || stderr.contains("nothing to commit") {
            debug!("nothing to commit");
            return Ok(());
        }

        Err(VcsError::CommandFailed {
            command: self.describe(&args),
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        })
    }

    fn push(&self, root: &Path, remote: &str, branch: &str) -> VcsResult<()> {
        self.run(root, &["push", remote, branch]).map(|_| ())
    }
}
