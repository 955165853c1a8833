//! In-memory gateway double.

use std::collections::HashSet;
use std::path::Path;

use parking_lot::Mutex;

use crate::{VcsError, VcsOp, VcsResult, VersionControlGateway};

/// Records every call and performs moves on the real filesystem.
///
/// Individual moves (by source name) and pushes can be made to fail.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    ops: Mutex<Vec<VcsOp>>,
    failing_moves: Mutex<HashSet<String>>,
    fail_push: Mutex<bool>,
}

impl RecordingGateway {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the move of `from` fail.
    pub fn fail_move_of(self, from: impl Into<String>) -> Self {
        self.failing_moves.lock().insert(from.into());
        self
    }

    /// Make every push fail.
    pub fn fail_pushes(self) -> Self {
        *self.fail_push.lock() = true;
        self
    }

    /// All recorded calls, in order.
    pub fn ops(&self) -> Vec<VcsOp> {
        self.ops.lock().clone()
    }

    /// Recorded moves as `(from, to)` pairs.
    pub fn moves(&self) -> Vec<(String, String)> {
        self.ops
            .lock()
            .iter()
            .filter_map(|op| match op {
                VcsOp::Move { from, to } => Some((from.clone(), to.clone())),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: VcsOp) {
        self.ops.lock().push(op);
    }
}

impl VersionControlGateway for RecordingGateway {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn tracked_move(&self, root: &Path, from: &str, to: &str) -> VcsResult<()> {
        if self.failing_moves.lock().contains(from) {
            return Err(VcsError::Injected(format!("move of `{from}` refused")));
        }
        std::fs::rename(root.join(from), root.join(to))?;
        self.record(VcsOp::Move {
            from: from.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }

    fn stage_all(&self, _root: &Path) -> VcsResult<()> {
        self.record(VcsOp::Stage);
        Ok(())
    }

    fn commit(&self, _root: &Path, message: &str) -> VcsResult<()> {
        self.record(VcsOp::Commit {
            message: message.to_string(),
        });
        Ok(())
    }

    fn push(&self, _root: &Path, remote: &str, branch: &str) -> VcsResult<()> {
        if *self.fail_push.lock() {
            return Err(VcsError::Injected(format!("push to {remote}/{branch} refused")));
        }
        self.record(VcsOp::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        Ok(())
    }
}
