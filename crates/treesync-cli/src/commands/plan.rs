//! Plan command implementation.

use treesync_common_config::validate;
use treesync_git::PlainFs;
use treesync_tree::Pipeline;

use crate::cli::{CommandContext, TreeArgs};
use crate::error::CliError;
use crate::output::print_output;

/// Print the rename plan for a directory; nothing on disk changes.
#[derive(Debug)]
pub struct PlanCommand<'a> {
    args: &'a TreeArgs,
}

impl<'a> PlanCommand<'a> {
    pub fn new(args: &'a TreeArgs) -> Self {
        Self { args }
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut config = ctx.config.clone();
        self.args.overrides.apply(&mut config);
        validate(&config)?;

        // Planning never calls the gateway.
        let gateway = PlainFs;
        let report = Pipeline::new(config, &gateway)?.plan(&self.args.dir)?;
        print_output(ctx, &report)
    }
}
