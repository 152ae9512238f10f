//! `files` command: show what a conversion would work with

use crate::catalog::ComponentCatalog;
use crate::cli::args::Args;
use crate::cli::commands::shared::load_configuration;
use crate::cli::input::relative_display;
use crate::converter::discover_inputs;
use anyhow::{Context, Result};
use colored::*;

pub fn run_files(args: &Args) -> Result<()> {
    let config = load_configuration(args)?;

    let inputs = discover_inputs(&config);
    println!(
        "{} ({})",
        "Files for conversion".bright_green().bold(),
        relative_display(&config.input_path(), &config.root)
    );
    if inputs.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for (i, path) in inputs.iter().enumerate() {
        println!(
            "  {}. {}",
            (i + 1).to_string().bright_yellow().bold(),
            relative_display(path, &config.input_path()).bright_cyan()
        );
    }

    let (catalog, stats) = ComponentCatalog::load(&config).context("Failed to load catalog")?;
    println!();
    println!(
        "{} ({} entries)",
        "Catalog files".bright_green().bold(),
        catalog.len()
    );
    if catalog.files().is_empty() {
        println!("  {}", "none".dimmed());
    }
    for path in catalog.files() {
        println!("  {}", relative_display(path, catalog.dir()).bright_cyan());
    }
    if stats.rows_skipped > 0 {
        println!(
            "{} {} malformed catalog rows skipped",
            "!".yellow(),
            stats.rows_skipped
        );
    }
    for error in &stats.errors {
        println!("{} {}", "!".yellow(), error);
    }
    Ok(())
}
