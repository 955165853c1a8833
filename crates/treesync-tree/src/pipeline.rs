//! One invocation over one root: scan, plan, rename, synthesize, record.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use treesync_common_config::TreesyncConfig;
use treesync_common_core::{Error, ErrorCode, RenamePlan, Result};
use treesync_common_fs::path::{absolute, file_name_string};
use treesync_common_log::spans::{phase_span, Timer};
use treesync_git::VersionControlGateway;

use crate::naming::NamingNormalizer;
use crate::renamer::TreeRenamer;
use crate::scanner::DirectoryScanner;
use crate::synthesizer::{BuildFileSynthesizer, SynthesisReport};

/// What an invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Normalize names and rename.
    Normalize,
    /// Write descriptors only.
    Synthesize,
    /// Both, in sequence.
    Sync,
}

impl Mode {
    pub fn renames(self) -> bool {
        matches!(self, Self::Normalize | Self::Sync)
    }

    pub fn synthesizes(self) -> bool {
        matches!(self, Self::Synthesize | Self::Sync)
    }

    fn commit_message(self, dir: &str) -> String {
        match self {
            Self::Normalize => format!("Renamed subdirectories in {dir}"),
            Self::Synthesize | Self::Sync => format!("Generate CMake files for {dir}"),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normalize => "normalize",
            Self::Synthesize => "synthesize",
            Self::Sync => "sync",
        };
        f.write_str(s)
    }
}

/// Outcome of the best-effort history bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VcsReport {
    pub gateway: String,
    pub staged: bool,
    pub committed: bool,
    pub pushed: bool,
    /// Failures that were logged and otherwise ignored.
    pub warnings: Vec<String>,
}

impl VcsReport {
    fn new(gateway: &str) -> Self {
        Self {
            gateway: gateway.to_string(),
            ..Self::default()
        }
    }

    fn warn(&mut self, operation: &str, error: impl fmt::Display) {
        warn!(operation, error = %error, "version control step failed, continuing");
        self.warnings.push(format!("{operation} failed: {error}"));
    }
}

/// Everything one successful run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub root: PathBuf,
    pub mode: Mode,
    /// Sub-project names in canonical order after the run.
    pub names: Vec<String>,
    /// Moves performed, in order.
    pub renamed: Vec<(String, String)>,
    /// Plan entries that needed no move.
    pub skipped: usize,
    pub synthesis: Option<SynthesisReport>,
    pub vcs: VcsReport,
}

impl RunSummary {
    /// True when any directory moved or any descriptor content changed.
    pub fn changed(&self) -> bool {
        !self.renamed.is_empty() || self.synthesis.as_ref().is_some_and(SynthesisReport::changed)
    }
}

/// Read-only view of what a rename run would do.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub root: PathBuf,
    pub canonical: bool,
    pub prefix_origin: u8,
    pub plan: RenamePlan,
}

/// Drives the stages for one root.
pub struct Pipeline<'a> {
    config: TreesyncConfig,
    scanner: DirectoryScanner,
    naming: NamingNormalizer,
    synthesizer: BuildFileSynthesizer,
    gateway: &'a dyn VersionControlGateway,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: TreesyncConfig, gateway: &'a dyn VersionControlGateway) -> Result<Self> {
        let scanner = DirectoryScanner::new(&config.scan)?;
        let naming = NamingNormalizer::new(&config.naming);
        let synthesizer = BuildFileSynthesizer::new(&config.descriptor, naming);
        Ok(Self {
            config,
            scanner,
            naming,
            synthesizer,
            gateway,
        })
    }

    fn resolve(root: &Path) -> Result<PathBuf> {
        absolute(root).map_err(|e| Error::FileSystem {
            code: ErrorCode::FILE_READ_ERROR,
            message: format!("cannot resolve `{}`: {e}", root.display()),
            path: Some(root.display().to_string()),
            source: Some(Box::new(e)),
        })
    }

    /// Compute the rename plan for `root` without touching anything.
    pub fn plan(&self, root: &Path) -> Result<PlanReport> {
        let root = Self::resolve(root)?;
        let names = self.scanner.scan(&root)?;
        let plan = self.naming.plan(&root, &names)?;
        Ok(PlanReport {
            canonical: plan.is_identity(),
            prefix_origin: self.config.naming.prefix_origin,
            root,
            plan,
        })
    }

    /// Run `mode` over `root`.
    ///
    /// Scan and plan errors abort before anything is mutated. Rename and
    /// write errors abort the run but keep what was already done.
    /// Version-control bookkeeping never fails the run.
    pub fn run(&self, root: &Path, mode: Mode) -> Result<RunSummary> {
        let root = Self::resolve(root)?;
        let root_str = root.display().to_string();
        let timer = Timer::start("run");
        info!(root = %root_str, %mode, gateway = self.gateway.name(), "starting");

        let mut names = {
            let _span = phase_span("scan", &root_str).entered();
            self.scanner.scan(&root)?
        };

        let mut renamed = Vec::new();
        let mut skipped = 0;
        if mode.renames() {
            let plan = {
                let _span = phase_span("plan", &root_str).entered();
                self.naming.plan(&root, &names)?
            };

            let outcome = {
                let _span = phase_span("rename", &root_str).entered();
                TreeRenamer::new(self.gateway).apply(&root, &plan)?
            };

            let rescanned = self.scanner.scan(&root)?;
            if rescanned != outcome.final_names {
                warn!(
                    expected = ?outcome.final_names,
                    found = ?rescanned,
                    "tree differs from the applied plan, using what is on disk"
                );
            }
            names = rescanned;
            renamed = outcome.moved;
            skipped = outcome.skipped;
        }

        let synthesis = if mode.synthesizes() {
            let _span = phase_span("synthesize", &root_str).entered();
            if !mode.renames() {
                let nodes: Vec<_> = names.iter().map(|n| self.naming.parse(&root, n)).collect();
                self.naming.check_collisions(&nodes)?;
            }
            Some(self.synthesizer.synthesize(&root, &names)?)
        } else {
            None
        };

        let mut summary = RunSummary {
            root,
            mode,
            names,
            renamed,
            skipped,
            synthesis,
            vcs: VcsReport::new(self.gateway.name()),
        };
        summary.vcs = self.record_history(&summary);

        timer.finish();
        info!(
            renamed = summary.renamed.len(),
            changed = summary.changed(),
            "done"
        );
        Ok(summary)
    }

    fn record_history(&self, summary: &RunSummary) -> VcsReport {
        let vcs = &self.config.vcs;
        let mut report = VcsReport::new(self.gateway.name());
        if !vcs.enabled || !vcs.commit {
            debug!("history bookkeeping disabled");
            return report;
        }
        if !summary.changed() {
            debug!("nothing changed, skipping commit");
            return report;
        }

        let _span = phase_span("vcs", &summary.root.display().to_string()).entered();
        let root = summary.root.as_path();
        let dir = file_name_string(root).unwrap_or_else(|| root.display().to_string());

        match self.gateway.stage_all(root) {
            Ok(()) => report.staged = true,
            Err(e) => {
                report.warn("stage", e);
                return report;
            }
        }

        match self.gateway.commit(root, &summary.mode.commit_message(&dir)) {
            Ok(()) => report.committed = true,
            Err(e) => {
                report.warn("commit", e);
                return report;
            }
        }

        if vcs.push {
            match self.gateway.push(root, &vcs.remote, &vcs.branch) {
                Ok(()) => report.pushed = true,
                Err(e) => report.warn("push", e),
            }
        }

        report
    }
}
