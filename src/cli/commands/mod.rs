//! Command implementations for the ang scan CLI
//!
//! Each command is implemented in its own module:
//! - `info`: summary of a single scan
//! - `check`: bulk read of files and directories with a pass/fail report

pub mod check;
pub mod info;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::{Result, bail};

/// Dispatch to the selected subcommand after setting up logging
pub fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args)?;

    match args.command {
        Some(Commands::Info(info_args)) => info::run_info(info_args),
        Some(Commands::Check(check_args)) => check::run_check(check_args),
        None => bail!("No command given; run with --help to see the available commands"),
    }
}
