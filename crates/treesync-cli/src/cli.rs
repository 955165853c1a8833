//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use treesync_common_config::{ConfigLoader, Environment, TreesyncConfig};
use treesync_tree::Mode;

use crate::commands::{PlanCommand, TreeCommand};
use crate::error::CliError;

/// Treesync - numbered sub-project trees and their CMake files
///
/// Renames the subdirectories of a folder to `01_name`, `02_name`, ... in
/// sorted order and writes a CMakeLists.txt at the root and in every child.
#[derive(Debug, Parser)]
#[command(
    name = "treesync",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "TREESYNC_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Renumber the subdirectories with tracked moves
    Rename(TreeArgs),

    /// Write the CMake files only
    Generate(TreeArgs),

    /// Renumber, then write the CMake files
    Sync(TreeArgs),

    /// Show the rename plan without changing anything
    Plan(TreeArgs),
}

/// Target directory plus per-run overrides.
#[derive(Debug, Clone, Args)]
pub struct TreeArgs {
    /// Directory whose subdirectories are processed
    #[arg(value_hint = ValueHint::DirPath)]
    pub dir: PathBuf,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Command-line settings that win over the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Number of the first subdirectory
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub prefix_origin: Option<u8>,

    /// Source glob written into every leaf, e.g. "*.cpp *.h"
    #[arg(long)]
    pub glob: Option<String>,

    /// Library every leaf links against
    #[arg(long)]
    pub link_target: Option<String>,

    /// Rename with the filesystem and skip git entirely
    #[arg(long)]
    pub no_vcs: bool,

    /// Do not stage or commit after the run
    #[arg(long)]
    pub no_commit: bool,

    /// Push after committing
    #[arg(long, conflicts_with = "no_commit")]
    pub push: bool,

    /// Remote to push to
    #[arg(long)]
    pub remote: Option<String>,

    /// Branch to push
    #[arg(long)]
    pub branch: Option<String>,
}

impl Overrides {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut TreesyncConfig) {
        if let Some(origin) = self.prefix_origin {
            config.naming.prefix_origin = origin;
        }
        if let Some(glob) = &self.glob {
            config.descriptor.glob_pattern = glob.clone();
        }
        if let Some(link) = &self.link_target {
            config.descriptor.link_target = link.clone();
        }
        if self.no_vcs {
            config.vcs.enabled = false;
        }
        if self.no_commit {
            config.vcs.commit = false;
        }
        if self.push {
            config.vcs.push = true;
        }
        if let Some(remote) = &self.remote {
            config.vcs.remote = remote.clone();
        }
        if let Some(branch) = &self.branch {
            config.vcs.branch = branch.clone();
        }
    }
}

impl Cli {
    /// Load configuration from `--config`, the working directory or defaults,
    /// then apply environment overrides.
    pub fn load_config(&self) -> Result<TreesyncConfig, CliError> {
        Environment::init()?;

        let cwd = std::env::current_dir().context("cannot determine the current directory")?;
        let loader = ConfigLoader::new(&cwd);
        let mut config = match &self.config {
            Some(path) => loader.load_file(cwd.join(path))?,
            None => loader.load()?,
        };

        Environment::apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Execute the selected command
    pub fn execute(&self, config: TreesyncConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            format: self.format,
        };

        match &self.command {
            Command::Rename(args) => TreeCommand::new(args, Mode::Normalize).execute(&ctx),
            Command::Generate(args) => TreeCommand::new(args, Mode::Synthesize).execute(&ctx),
            Command::Sync(args) => TreeCommand::new(args, Mode::Sync).execute(&ctx),
            Command::Plan(args) => PlanCommand::new(args).execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: TreesyncConfig,
    pub format: OutputFormat,
}
