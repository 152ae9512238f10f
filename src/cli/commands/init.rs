//! `init` command: create the workspace layout

use crate::cli::args::Args;
use crate::cli::commands::shared::load_configuration;
use crate::cli::input::relative_display;
use crate::workspace::bootstrap;
use anyhow::{Context, Result};
use colored::*;

pub fn run_init(args: &Args) -> Result<()> {
    let config = load_configuration(args)?;
    let report = bootstrap(&config).context("Failed to prepare the workspace")?;

    if !report.changed_anything() {
        println!(
            "{} Workspace at {} is already set up ({} catalog files)",
            "✓".green(),
            config.root.display(),
            report.catalog_files_existing
        );
        return Ok(());
    }

    println!("{}", "Workspace prepared".bright_green().bold());
    for dir in &report.dirs_created {
        println!("  + {}", relative_display(dir, &config.root).bright_cyan());
    }
    if report.packages_file_created {
        println!(
            "  + {} (empty packages list)",
            relative_display(&config.packages_path(), &config.root).bright_cyan()
        );
    }
    for file in &report.catalog_files_seeded {
        println!("  + {}", relative_display(file, &config.root).bright_cyan());
    }
    println!(
        "{} catalog files seeded, {} already present",
        report.catalog_files_seeded.len().to_string().bright_yellow().bold(),
        report.catalog_files_existing
    );
    Ok(())
}
