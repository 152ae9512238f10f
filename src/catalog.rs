//! Component catalog backed by a directory of delimited files.
//!
//! Each backing file starts with a title row followed by
//! `nonStandard;standard;deleteFlag` rows. Files are read in file-name order
//! and merged into one case-insensitive map; a later file or row overrides
//! an earlier one with the same key.
//!
//! The catalog is rebuilt for every conversion. Entries approved by the
//! operator are appended to a backing file and become visible to lookups
//! immediately.

use crate::config::WorkspaceConfig;
use crate::constants::{DELETE_FLAG_CLEAR, DELETE_FLAG_SET, FIELD_DELIMITER};
use crate::delimited::{join_fields, split_fields, trim_blanks};
use crate::error::{PnpError, Result};
use crate::models::{ComponentEntry, catalog_key};
use glob::{Pattern, glob};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Statistics gathered while loading the catalog
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    pub files_read: usize,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    /// Keys defined more than once; the last definition won
    pub overrides: usize,
    pub errors: Vec<String>,
    pub load_duration: Duration,
}

/// In-memory view of the catalog directory
#[derive(Debug, Clone)]
pub struct ComponentCatalog {
    dir: PathBuf,
    header: String,
    files: Vec<PathBuf>,
    entries: HashMap<String, ComponentEntry>,
}

impl ComponentCatalog {
    /// Create an empty catalog rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>, header: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            header: header.into(),
            files: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Load the catalog described by the workspace configuration
    pub fn load(config: &WorkspaceConfig) -> Result<(Self, LoadStats)> {
        Self::load_from(
            &config.catalog_path(),
            config.catalog_ext(),
            &config.catalog_header,
        )
    }

    /// Load every `*.<extension>` file in `dir`
    ///
    /// A missing directory yields an empty catalog. Unreadable files are
    /// skipped and recorded in [`LoadStats::errors`].
    pub fn load_from(dir: &Path, extension: &str, header: &str) -> Result<(Self, LoadStats)> {
        let start_time = Instant::now();
        let mut catalog = Self::new(dir, header);
        let mut stats = LoadStats::default();

        if !dir.is_dir() {
            debug!("Catalog directory {} not found, using empty catalog", dir.display());
            return Ok((catalog, stats));
        }

        catalog.files = discover_files(dir, extension)?;

        for path in catalog.files.clone() {
            match fs::read(&path) {
                Ok(bytes) => {
                    catalog.merge_file(&String::from_utf8_lossy(&bytes), &mut stats);
                    stats.files_read += 1;
                }
                Err(e) => {
                    warn!("Failed to read catalog file {}: {}", path.display(), e);
                    stats.errors.push(format!("{}: {}", path.display(), e));
                }
            }
        }

        stats.load_duration = start_time.elapsed();
        info!(
            "Catalog loaded: {} entries from {} files ({} rows skipped)",
            catalog.len(),
            stats.files_read,
            stats.rows_skipped
        );

        Ok((catalog, stats))
    }

    fn merge_file(&mut self, content: &str, stats: &mut LoadStats) {
        // First line is the title row
        for line in content.lines().skip(1) {
            let cells = split_fields(line);
            if cells.len() < 3 {
                stats.rows_skipped += 1;
                continue;
            }

            let non_standard = trim_blanks(&cells[0]);
            if non_standard.is_empty() {
                stats.rows_skipped += 1;
                continue;
            }

            let entry = ComponentEntry::new(
                non_standard,
                trim_blanks(&cells[1]),
                trim_blanks(&cells[2]) == DELETE_FLAG_SET,
            );
            if self.entries.insert(entry.key.clone(), entry).is_some() {
                stats.overrides += 1;
            }
            stats.rows_loaded += 1;
        }
    }

    /// Case-insensitive exact lookup
    pub fn lookup(&self, designator: &str) -> Option<&ComponentEntry> {
        self.entries.get(&catalog_key(designator))
    }

    /// Append an entry to `target` and make it visible immediately
    ///
    /// Parent directories are created as needed. A new or empty target gets
    /// the title row first.
    pub fn append(
        &mut self,
        target: &Path,
        non_standard: &str,
        standard_name: &str,
        delete: bool,
    ) -> Result<ComponentEntry> {
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PnpError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(target)
            .map_err(|e| PnpError::io(target, e))?;

        let mut text = String::new();
        if file.metadata().map_err(|e| PnpError::io(target, e))?.len() == 0 {
            text.push_str(&self.header);
            text.push('\n');
        } else if !ends_with_newline(&mut file).map_err(|e| PnpError::io(target, e))? {
            text.push('\n');
        }

        let flag = if delete { DELETE_FLAG_SET } else { DELETE_FLAG_CLEAR };
        text.push_str(&join_fields(
            &[non_standard, standard_name, flag],
            FIELD_DELIMITER,
        ));
        text.push('\n');

        file.write_all(text.as_bytes())
            .map_err(|e| PnpError::io(target, e))?;

        let entry = ComponentEntry::new(non_standard, standard_name, delete);
        self.entries.insert(entry.key.clone(), entry.clone());

        if !self.files.iter().any(|f| f == target) {
            self.files.push(target.to_path_buf());
            self.files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }

        debug!(
            "Catalog entry '{}' -> '{}' (delete: {}) appended to {}",
            non_standard,
            standard_name,
            delete,
            target.display()
        );

        Ok(entry)
    }

    /// Backing files in load order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Regular files matching `*.<extension>` in `dir`, sorted by file name
fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(extension)
    );

    let mut files = Vec::new();
    for entry in glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable catalog entry: {}", e),
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} catalog files in {}", files.len(), dir.display());
    Ok(files)
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
