//! Applying a rename plan through the version-control gateway.

use std::io;
use std::path::Path;

use tracing::{debug, info, warn};
use treesync_common_core::{Error, RenamePlan, Result};
use treesync_common_fs::path::join_name;
use treesync_common_log::spans::rename_span;
use treesync_git::VersionControlGateway;

/// Result of applying a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameOutcome {
    /// Names in scan order after the plan was applied.
    pub final_names: Vec<String>,
    /// Pairs that were moved, in order.
    pub moved: Vec<(String, String)>,
    /// Number of no-op entries that were skipped.
    pub skipped: usize,
}

impl RenameOutcome {
    pub fn changed(&self) -> bool {
        !self.moved.is_empty()
    }
}

/// Executes rename plans. Moves happen one at a time in plan order and are
/// never rolled back.
pub struct TreeRenamer<'a> {
    gateway: &'a dyn VersionControlGateway,
}

impl<'a> TreeRenamer<'a> {
    pub fn new(gateway: &'a dyn VersionControlGateway) -> Self {
        Self { gateway }
    }

    /// Apply `plan` under `root`.
    ///
    /// On the first failed move the error carries the pairs completed so far;
    /// those stay on disk.
    pub fn apply(&self, root: &Path, plan: &RenamePlan) -> Result<RenameOutcome> {
        let mut outcome = RenameOutcome {
            final_names: plan.final_names(),
            ..RenameOutcome::default()
        };

        for entry in plan.entries() {
            if entry.is_noop() {
                outcome.skipped += 1;
                continue;
            }

            let _span = rename_span(&entry.old_name, &entry.new_name).entered();
            if let Err(source) = self.move_one(root, &entry.old_name, &entry.new_name) {
                warn!(
                    gateway = self.gateway.name(),
                    completed = outcome.moved.len(),
                    error = %source,
                    "rename failed, earlier moves are kept"
                );
                return Err(Error::Rename {
                    old_name: entry.old_name.clone(),
                    new_name: entry.new_name.clone(),
                    completed: outcome.moved,
                    source,
                });
            }

            debug!("renamed");
            outcome
                .moved
                .push((entry.old_name.clone(), entry.new_name.clone()));
        }

        info!(
            moved = outcome.moved.len(),
            skipped = outcome.skipped,
            "rename plan applied"
        );
        Ok(outcome)
    }

    fn move_one(
        &self,
        root: &Path,
        from: &str,
        to: &str,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let target = join_name(root, to).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("`{to}` is not a plain name"))
        })?;
        // `git mv a b` moves `a` inside `b` when `b` is an existing directory.
        if target.exists() {
            return Err(Box::new(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("`{to}` already exists"),
            )));
        }
        self.gateway.tracked_move(root, from, to)?;
        Ok(())
    }
}
