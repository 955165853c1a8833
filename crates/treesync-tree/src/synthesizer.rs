//! Build descriptor rendering and writing.
//!
//! Descriptors are rendered from the canonical names alone and always fully
//! overwritten, so two runs over the same tree produce identical bytes.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use treesync_common_config::DescriptorConfig;
use treesync_common_core::{Error, Result};
use treesync_common_fs::path::file_name_string;
use treesync_common_log::spans::file_span;

use crate::naming::NamingNormalizer;

/// Upper bound when reading back an existing descriptor.
const MAX_DESCRIPTOR_SIZE: usize = 1024 * 1024;

/// Grouping label for a root directory name.
///
/// Words are split on `_`; each word gets an upper-case first character and
/// a lower-case rest, and an empty word becomes a single space.
pub fn group_label(root_name: &str) -> String {
    root_name
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => " ".to_string(),
            }
        })
        .collect()
}

/// Descriptor written inside one sub-project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafDescriptor {
    pub target: String,
    pub glob_pattern: String,
    pub include_dirs: Vec<String>,
    pub group: String,
    pub link_target: String,
}

impl LeafDescriptor {
    pub fn render(&self) -> String {
        let include = if self.include_dirs.is_empty() {
            String::new()
        } else {
            let dirs: String = self.include_dirs.iter().map(|d| format!("    {d}\n")).collect();
            format!("include_directories(\n{dirs})\n\n")
        };

        format!(
            "set(TARGET {target})\n\
             \n\
             file(GLOB SOURCES {glob})\n\
             \n\
             {include}\
             add_executable(${{TARGET}} ${{SOURCES}})\n\
             set_property(TARGET ${{TARGET}} PROPERTY FOLDER \"{group}\")\n\
             \n\
             target_link_libraries(${{TARGET}}\n\
             PRIVATE\n    {link}\n\
             )\n",
            target = self.target,
            glob = self.glob_pattern,
            group = self.group,
            link = self.link_target,
        )
    }
}

/// Descriptor written at the root, listing the children in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateDescriptor {
    pub preamble: Vec<String>,
    pub children: Vec<String>,
}

impl AggregateDescriptor {
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.preamble.is_empty() {
            out.push_str(&self.preamble.join("\n"));
            out.push_str("\n\n");
        }
        for child in &self.children {
            out.push_str(&format!("add_subdirectory({child})\n"));
        }
        out
    }
}

/// One descriptor file that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorWrite {
    pub path: PathBuf,
    /// Content differs from what was on disk before.
    pub changed: bool,
}

/// Everything a synthesis run wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisReport {
    pub aggregate: DescriptorWrite,
    pub leaves: Vec<DescriptorWrite>,
}

impl SynthesisReport {
    /// Number of files whose content changed.
    pub fn changed_count(&self) -> usize {
        self.leaves.iter().filter(|w| w.changed).count() + usize::from(self.aggregate.changed)
    }

    pub fn changed(&self) -> bool {
        self.changed_count() > 0
    }
}

/// Writes the aggregate and leaf descriptors for a canonical tree.
#[derive(Debug, Clone)]
pub struct BuildFileSynthesizer {
    config: DescriptorConfig,
    naming: NamingNormalizer,
}

impl BuildFileSynthesizer {
    pub fn new(config: &DescriptorConfig, naming: NamingNormalizer) -> Self {
        Self {
            config: config.clone(),
            naming,
        }
    }

    /// Leaf descriptor for child `name` of a root whose directory name is `root_name`.
    pub fn leaf(&self, root_name: &str, name: &str) -> LeafDescriptor {
        LeafDescriptor {
            target: self.naming.target_name(name).to_string(),
            glob_pattern: self.config.glob_pattern.clone(),
            include_dirs: self.config.include_dirs.clone(),
            group: group_label(root_name),
            link_target: self.config.link_target.clone(),
        }
    }

    pub fn aggregate<S: AsRef<str>>(&self, names: &[S]) -> AggregateDescriptor {
        AggregateDescriptor {
            preamble: self.config.aggregate_preamble.clone(),
            children: names.iter().map(|n| n.as_ref().to_string()).collect(),
        }
    }

    /// Write every leaf descriptor, then the aggregate, under `root`.
    ///
    /// `names` must be the on-disk names in canonical order. Each file is
    /// written atomically; a failure stops the run with [`Error::Write`].
    pub fn synthesize<S: AsRef<str>>(&self, root: &Path, names: &[S]) -> Result<SynthesisReport> {
        let root_name = file_name_string(root).unwrap_or_default();

        let mut leaves = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let path = root.join(name).join(&self.config.file_name);
            let content = self.leaf(&root_name, name).render();
            leaves.push(self.write(path, &content)?);
        }

        let aggregate_path = root.join(&self.config.file_name);
        let aggregate = self.write(aggregate_path, &self.aggregate(names).render())?;

        let report = SynthesisReport { aggregate, leaves };
        info!(
            files = report.leaves.len() + 1,
            changed = report.changed_count(),
            "descriptors written"
        );
        Ok(report)
    }

    fn write(&self, path: PathBuf, content: &str) -> Result<DescriptorWrite> {
        let _span = file_span("write", &path.display().to_string()).entered();

        let changed = match treesync_common_fs::read_if_exists(&path, MAX_DESCRIPTOR_SIZE) {
            Ok(Some(previous)) => previous != content,
            Ok(None) => true,
            Err(e) => {
                debug!(error = %e, "could not read previous descriptor");
                true
            }
        };

        treesync_common_fs::write_string_atomic(&path, content).map_err(|e| Error::Write {
            path: path.clone(),
            source: Box::new(e),
        })?;

        debug!(changed, "written");
        Ok(DescriptorWrite { path, changed })
    }
}
