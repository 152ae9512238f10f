//! `convert` command: convert one file or a batch

use crate::cli::args::{Args, ConvertArgs};
use crate::cli::commands::shared::{
    create_progress_bar, format_file_stats, load_configuration, print_batch_summary,
};
use crate::cli::input::{TerminalResolver, prompt_input_selection};
use crate::config::WorkspaceConfig;
use crate::converter::{FileConverter, discover_inputs, resolve_input};
use crate::resolver::{DecliningResolver, DesignatorResolver, Resolution, display_name};
use anyhow::{Context, Result, bail};
use colored::*;
use indicatif::ProgressBar;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

pub fn run_convert(args: &Args, convert_args: &ConvertArgs) -> Result<()> {
    let config = load_configuration(args)?;

    // File selection and designator prompts share one locked reader
    let mut stdin = io::stdin().lock();
    let inputs = select_inputs(&config, convert_args, &mut stdin, &mut io::stdout())?;
    if inputs.is_empty() {
        println!("{}", "No files selected for conversion.".yellow());
        return Ok(());
    }

    let converter = FileConverter::new(config)
        .context("Failed to prepare normalization rules")?
        .with_row_logging(convert_args.show_rows);

    let mut resolver: Box<dyn DesignatorResolver> = if convert_args.no_prompt {
        Box::new(DecliningResolver)
    } else {
        Box::new(TerminalResolver::new(stdin, io::stdout()))
    };

    if let [input] = inputs.as_slice() {
        let stats = converter
            .convert_file(input, resolver.as_mut())
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        println!("{} {}", "✓".green(), format_file_stats(&stats));
        return Ok(());
    }

    let bar = if args.show_progress() {
        create_progress_bar(inputs.len() as u64, "Converting")
    } else {
        ProgressBar::hidden()
    };
    let mut prompting = SuspendingResolver {
        inner: resolver.as_mut(),
        bar: &bar,
    };

    let summary = converter.convert_batch_with(&inputs, &mut prompting, |path, result| {
        bar.inc(1);
        bar.set_message(display_name(path));
        if let Err(e) = result {
            bar.println(format!("{} {}: {}", "✗".red(), display_name(path), e));
        }
    });
    bar.finish_and_clear();

    print_batch_summary(&summary);
    if !summary.all_succeeded() {
        bail!(
            "{} of {} files failed to convert",
            summary.failed.len(),
            summary.total
        );
    }
    Ok(())
}

/// Files named on the command line, every input, or an interactive choice
fn select_inputs<R: BufRead, W: Write>(
    config: &WorkspaceConfig,
    convert_args: &ConvertArgs,
    input: &mut R,
    output: &mut W,
) -> Result<Vec<PathBuf>> {
    if !convert_args.files.is_empty() {
        return Ok(convert_args
            .files
            .iter()
            .map(|name| resolve_input(config, name))
            .collect());
    }

    let available = discover_inputs(config);
    if available.is_empty() {
        info!("No input files in {}", config.input_path().display());
        return Ok(available);
    }
    if convert_args.all || convert_args.no_prompt {
        return Ok(available);
    }

    prompt_input_selection(input, output, &available).context("Failed to read file selection")
}

/// Hides the progress bar while the operator answers a prompt
struct SuspendingResolver<'a> {
    inner: &'a mut dyn DesignatorResolver,
    bar: &'a ProgressBar,
}

impl DesignatorResolver for SuspendingResolver<'_> {
    fn resolve(&mut self, designator: &str, catalog_files: &[PathBuf]) -> Resolution {
        let inner = &mut self.inner;
        self.bar.suspend(|| inner.resolve(designator, catalog_files))
    }
}
