//! Treesync CLI
//!
//! Main entry point for the `treesync` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use treesync_cli::cli::Cli;
use treesync_cli::error::{CliError, Exit};
use treesync_cli::output::print_error;
use treesync_common_log::{LogConfig, LogLevel};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            debug!(error = ?e, "command failed");
            print_error(cli.format, &e);
            e.exit_code().into()
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config)
}

fn init_tracing(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }

    if let Err(e) = treesync_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
