//! File conversion engine.
//!
//! Converts placement tables one line at a time: each line is split into a
//! record, transformed against the component catalog and written out unless
//! the catalog marks its designator for deletion. Batches run strictly one
//! file after another; a file that cannot be opened or created fails alone
//! and the batch carries on.

pub mod discovery;

#[cfg(test)]
pub mod tests;

pub use discovery::{discover_inputs, resolve_input};

use crate::catalog::ComponentCatalog;
use crate::config::WorkspaceConfig;
use crate::delimited::{strip_bom, trim_line_ending};
use crate::error::{PnpError, Result};
use crate::models::{BatchSummary, ConversionStats, Record};
use crate::normalize::CellNormalizer;
use crate::resolver::DesignatorResolver;
use crate::transform::RecordTransformer;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, trace};

/// Converts placement tables using the workspace layout
#[derive(Debug)]
pub struct FileConverter {
    config: WorkspaceConfig,
    normalizer: CellNormalizer,
    show_rows: bool,
}

impl FileConverter {
    /// Create a converter for the given workspace
    pub fn new(config: WorkspaceConfig) -> Result<Self> {
        Ok(Self {
            config,
            normalizer: CellNormalizer::new()?,
            show_rows: false,
        })
    }

    /// Log every transformed row at info level
    pub fn with_row_logging(mut self, show_rows: bool) -> Self {
        self.show_rows = show_rows;
        self
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Output location for an input file: same name inside the output directory
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let name = input.file_name().unwrap_or(input.as_os_str());
        self.config.output_path().join(name)
    }

    /// Convert `input` into `output` against an already loaded catalog
    pub fn convert(
        &self,
        input: &Path,
        output: &Path,
        catalog: &mut ComponentCatalog,
        resolver: &mut dyn DesignatorResolver,
    ) -> Result<ConversionStats> {
        let source = File::open(input).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PnpError::InputNotFound {
                path: input.to_path_buf(),
            },
            _ => PnpError::io(input, e),
        })?;
        let mut reader = BufReader::new(source);

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PnpError::io(parent, e))?;
        }
        let mut writer =
            BufWriter::new(File::create(output).map_err(|e| PnpError::io(output, e))?);

        let transformer = RecordTransformer::new(&self.normalizer);
        let mut stats = ConversionStats {
            input_path: input.to_path_buf(),
            output_path: output.to_path_buf(),
            ..Default::default()
        };

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| PnpError::io(input, e))?;
            if read == 0 {
                break;
            }

            let mut bytes = trim_line_ending(&buf);
            if stats.lines_in == 0 {
                bytes = strip_bom(bytes);
            }
            let line = String::from_utf8_lossy(bytes);

            let outcome = transformer.transform(Record::parse(&line), catalog, resolver);
            stats.record(&outcome);

            if self.show_rows {
                info!(
                    line = stats.lines_in,
                    dropped = outcome.drop,
                    fields = ?outcome.record.fields(),
                    "row"
                );
            } else {
                trace!(line = stats.lines_in, dropped = outcome.drop, "row");
            }

            if outcome.drop {
                continue;
            }

            writer
                .write_all(outcome.record.to_line().as_bytes())
                .and_then(|_| writer.write_all(b"\n"))
                .map_err(|e| PnpError::io(output, e))?;
        }

        writer.flush().map_err(|e| PnpError::io(output, e))?;

        debug!(
            "Converted {}: {} lines in, {} out, {} dropped",
            input.display(),
            stats.lines_in,
            stats.lines_out,
            stats.rows_dropped
        );
        Ok(stats)
    }

    /// Convert one input into the output directory with a freshly loaded catalog
    pub fn convert_file(
        &self,
        input: &Path,
        resolver: &mut dyn DesignatorResolver,
    ) -> Result<ConversionStats> {
        let (mut catalog, load_stats) = ComponentCatalog::load(&self.config)?;
        debug!(
            "Catalog for {}: {} entries, {} files",
            input.display(),
            catalog.len(),
            load_stats.files_read
        );

        let output = self.output_path_for(input);
        info!("Converting {} -> {}", input.display(), output.display());
        self.convert(input, &output, &mut catalog, resolver)
    }

    /// Convert inputs one at a time, collecting failures instead of stopping
    pub fn convert_batch(
        &self,
        inputs: &[PathBuf],
        resolver: &mut dyn DesignatorResolver,
    ) -> BatchSummary {
        self.convert_batch_with(inputs, resolver, |_, _| {})
    }

    /// Batch conversion with a callback after each file
    pub fn convert_batch_with<F>(
        &self,
        inputs: &[PathBuf],
        resolver: &mut dyn DesignatorResolver,
        mut on_file: F,
    ) -> BatchSummary
    where
        F: FnMut(&Path, &Result<ConversionStats>),
    {
        let start_time = Instant::now();
        let mut summary = BatchSummary {
            total: inputs.len(),
            ..Default::default()
        };

        for input in inputs {
            let result = self.convert_file(input, resolver);
            on_file(input, &result);

            match result {
                Ok(stats) => summary.converted.push(stats),
                Err(e) => {
                    error!("Failed to convert {}: {}", input.display(), e);
                    summary.failed.push((input.clone(), e.to_string()));
                }
            }
        }

        summary.elapsed = start_time.elapsed();
        info!(
            "Batch complete: {}/{} converted",
            summary.succeeded(),
            summary.total
        );
        summary
    }
}
