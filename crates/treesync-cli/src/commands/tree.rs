//! Rename, generate and sync commands.

use std::path::Path;

use tracing::debug;
use treesync_common_config::{validate, TreesyncConfig};
use treesync_git::{detect_repo, GitCli, PlainFs, VersionControlGateway};
use treesync_tree::{Mode, Pipeline};

use crate::cli::{CommandContext, TreeArgs};
use crate::error::CliError;
use crate::output::print_output;

/// Pick the gateway for `dir`.
///
/// Inside a git work tree moves must be tracked, so an unusable `git`
/// executable is an error unless version control was switched off. Outside a
/// work tree version control is disabled for the run and moves are plain
/// renames.
pub fn select_gateway(
    config: &mut TreesyncConfig,
    dir: &Path,
) -> Result<Box<dyn VersionControlGateway>, CliError> {
    if !config.vcs.enabled {
        debug!("version control disabled, using plain renames");
        return Ok(Box::new(PlainFs));
    }
    // The pipeline reports a missing root itself.
    if !dir.is_dir() {
        return Ok(Box::new(PlainFs));
    }

    let repo = detect_repo(dir).map_err(|e| CliError::Other(e.into()))?;
    match repo {
        Some(info) if !info.is_bare => {
            let git = GitCli::new(&config.vcs.git_binary);
            if !git.is_available() {
                return Err(CliError::Config {
                    message: format!(
                        "`{}` is inside the git work tree `{}` but git executable `{}` cannot be run",
                        dir.display(),
                        info.root_path.display(),
                        config.vcs.git_binary
                    ),
                    source: None,
                    hint: Some(
                        "install git, point vcs.git_binary at it, or pass --no-vcs to rename without history"
                            .to_string(),
                    ),
                });
            }
            Ok(Box::new(git))
        }
        _ => {
            debug!(dir = %dir.display(), "not inside a git work tree, using plain renames");
            config.vcs.enabled = false;
            Ok(Box::new(PlainFs))
        }
    }
}

/// Runs the pipeline in one mode.
#[derive(Debug)]
pub struct TreeCommand<'a> {
    args: &'a TreeArgs,
    mode: Mode,
}

impl<'a> TreeCommand<'a> {
    pub fn new(args: &'a TreeArgs, mode: Mode) -> Self {
        Self { args, mode }
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut config = ctx.config.clone();
        self.args.overrides.apply(&mut config);
        validate(&config)?;

        let gateway = select_gateway(&mut config, &self.args.dir)?;
        let summary = Pipeline::new(config, gateway.as_ref())?.run(&self.args.dir, self.mode)?;
        print_output(ctx, &summary)
    }
}
