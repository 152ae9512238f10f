//! Command implementations for the pnp-processor CLI
//!
//! Each subcommand lives in its own module; `shared` holds logging setup,
//! configuration loading and report formatting used by all of them.

pub mod convert;
pub mod files;
pub mod init;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Main command runner
///
/// Installs logging and dispatches to the subcommand handler. Without a
/// subcommand nothing runs; the binary prints help in that case.
pub fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args);

    match &args.command {
        Some(Commands::Init) => init::run_init(&args),
        Some(Commands::Convert(convert_args)) => convert::run_convert(&args, convert_args),
        Some(Commands::Files) => files::run_files(&args),
        None => Ok(()),
    }
}
