//! Shared components for CLI commands

use crate::cli::args::Args;
use crate::config::WorkspaceConfig;
use crate::constants::LOG_TARGET;
use crate::models::{BatchSummary, ConversionStats};
use crate::resolver::display_name;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tracing::debug;

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load the layered configuration and apply CLI overrides
pub fn load_configuration(args: &Args) -> Result<WorkspaceConfig> {
    let config = WorkspaceConfig::load_layered(args.config.as_deref(), args.root.clone())
        .context("Failed to load configuration")?;
    debug!("Workspace root: {}", config.root.display());
    Ok(config)
}

/// Progress bar for a batch of files
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// One-line report for a converted file
pub fn format_file_stats(stats: &ConversionStats) -> String {
    let mut line = format!(
        "{}: {} lines in, {} out",
        display_name(&stats.input_path),
        stats.lines_in,
        stats.lines_out
    );

    let mut details = Vec::new();
    if stats.rows_dropped > 0 {
        details.push(format!("{} dropped", stats.rows_dropped));
    }
    if stats.designators_replaced > 0 {
        details.push(format!("{} replaced", stats.designators_replaced));
    }
    if stats.catalog_additions > 0 {
        details.push(format!("{} added to catalog", stats.catalog_additions));
    }
    if stats.designators_declined > 0 {
        details.push(format!("{} unresolved", stats.designators_declined));
    }
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }
    line
}

/// Print the outcome of a batch
pub fn print_batch_summary(summary: &BatchSummary) {
    println!();
    println!("{}", "Conversion summary".bright_green().bold());
    for stats in &summary.converted {
        println!("  {} {}", "✓".green(), format_file_stats(stats));
    }
    for (path, reason) in &summary.failed {
        println!("  {} {}: {}", "✗".red(), display_name(path), reason);
    }

    let count = format!("{}/{}", summary.succeeded(), summary.total);
    let count = if summary.all_succeeded() {
        count.bright_green().bold()
    } else {
        count.bright_red().bold()
    };
    println!(
        "Converted {} files in {}",
        count,
        HumanDuration(summary.elapsed)
    );
}
