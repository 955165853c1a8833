//! Directory scanning.

use std::path::Path;

use tracing::debug;
use treesync_common_config::ScanConfig;
use treesync_common_core::{Error, Result};

/// Lists the sub-project directories directly under a root.
#[derive(Debug, Clone, Default)]
pub struct DirectoryScanner {
    exclude: Vec<glob::Pattern>,
}

impl DirectoryScanner {
    /// Build a scanner from the exclusion patterns in `config`.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let exclude = config
            .exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p)
                    .map_err(|e| Error::config(format!("invalid exclude pattern `{p}`: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { exclude })
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(name))
    }

    /// Names of the immediate child directories of `root`, in lexicographic
    /// string order. Files and excluded names are left out.
    pub fn scan(&self, root: &Path) -> Result<Vec<String>> {
        if !treesync_common_fs::is_dir(root) {
            return Err(Error::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let names: Vec<String> = treesync_common_fs::list_dir_names(root)?
            .into_iter()
            .filter(|name| {
                let excluded = self.is_excluded(name);
                if excluded {
                    debug!(%name, "excluded from scan");
                }
                !excluded
            })
            .collect();

        debug!(root = %root.display(), count = names.len(), "scanned");
        Ok(names)
    }
}
