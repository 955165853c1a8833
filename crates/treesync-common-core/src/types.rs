//! Common types shared by the scanning, planning and renaming stages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One sub-project directory as seen during planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNode {
    /// Current on-disk directory name.
    pub name: String,
    /// Two-digit ordinal parsed from the name, if present.
    pub prefix: Option<u8>,
    /// Name without its prefix and separator; the whole name when unprefixed.
    /// A name made of a prefix and a lone separator keeps the separator.
    pub suffix: String,
    /// Absolute path of the directory.
    pub path: PathBuf,
}

impl ProjectNode {
    /// Build target name of this sub-project.
    pub fn target_name(&self) -> &str {
        &self.suffix
    }
}

/// A single `old_name -> new_name` step of a rename plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEntry {
    pub old_name: String,
    pub new_name: String,
}

impl RenameEntry {
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    /// True when the entry does not change anything.
    pub fn is_noop(&self) -> bool {
        self.old_name == self.new_name
    }
}

/// Ordered rename plan, one entry per scanned directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    entries: Vec<RenameEntry>,
}

impl RenamePlan {
    pub fn new(entries: Vec<RenameEntry>) -> Self {
        Self { entries }
    }

    /// Plan that keeps every name as it is.
    pub fn identity<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(
            names
                .iter()
                .map(|n| RenameEntry::new(n.as_ref(), n.as_ref()))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[RenameEntry] {
        &self.entries
    }

    /// Entries that actually move a directory.
    pub fn pending(&self) -> impl Iterator<Item = &RenameEntry> {
        self.entries.iter().filter(|e| !e.is_noop())
    }

    pub fn is_identity(&self) -> bool {
        self.entries.iter().all(RenameEntry::is_noop)
    }

    /// Names in scan order once the plan has been applied.
    pub fn final_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.new_name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_pending_skips_noops() {
        let plan = RenamePlan::new(vec![
            RenameEntry::new("01_a_proj", "01_a_proj"),
            RenameEntry::new("b_proj", "02_b_proj"),
            RenameEntry::new("third", "03_third"),
        ]);

        assert!(!plan.is_identity());
        let pending: Vec<_> = plan.pending().map(|e| e.old_name.as_str()).collect();
        assert_eq!(pending, vec!["b_proj", "third"]);
        assert_eq!(plan.final_names(), vec!["01_a_proj", "02_b_proj", "03_third"]);
    }

    #[test]
    fn test_identity_plan() {
        let plan = RenamePlan::identity(&["01_x", "02_y"]);
        assert!(plan.is_identity());
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.pending().count(), 0);
    }

    #[test]
    fn test_plan_serializes() {
        let plan = RenamePlan::new(vec![RenameEntry::new("a", "01_a")]);
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"entries":[{"old_name":"a","new_name":"01_a"}]}"#);
    }
}
