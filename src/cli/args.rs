//! Command-line argument definitions
//!
//! The CLI is defined with the clap derive API. Global options select the
//! workspace and logging verbosity; each subcommand carries its own flags.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the placement table processor
///
/// Normalizes pick-and-place tables exported by CAD tools and maps package
/// designators to canonical names using an editable component catalog.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pnp-processor",
    version,
    about = "Normalize pick-and-place tables against a component catalog",
    long_about = "Converts semicolon-delimited pick-and-place tables from the input directory \
                  into the output directory. Cell values are normalized, capacitor and resistor \
                  rotations are corrected and package designators are replaced with canonical \
                  names from the component catalog. Unknown designators can be added to the \
                  catalog interactively while a file is being converted."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workspace root holding the working directories
    #[arg(short = 'r', long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file (TOML)
    ///
    /// Defaults to pnp-processor/config.toml in the user configuration
    /// directory when that file exists.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Create the working directories and seed catalog files
    Init,
    /// Convert placement tables
    Convert(ConvertArgs),
    /// List input files and catalog backing files
    Files,
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Files to convert: paths, or names inside the input directory
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Convert every file in the input directory
    #[arg(short = 'a', long = "all", conflicts_with = "files")]
    pub all: bool,

    /// Leave unknown designators unchanged instead of asking
    #[arg(long = "no-prompt")]
    pub no_prompt: bool,

    /// Log every transformed row
    #[arg(long = "show-rows")]
    pub show_rows: bool,
}

impl Args {
    /// Log level for the crate filter
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars are hidden in quiet mode
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
