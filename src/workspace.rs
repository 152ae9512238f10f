//! Working-directory bootstrap.
//!
//! Makes sure the working directories exist and seeds one catalog backing
//! file per line of the packages list. Existing catalog files are never
//! touched, so running the bootstrap again is harmless.

use crate::config::WorkspaceConfig;
use crate::constants::UNKNOWN_PACKAGE_NAME;
use crate::error::{PnpError, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a bootstrap run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub dirs_created: Vec<PathBuf>,
    pub packages_file_created: bool,
    pub catalog_files_seeded: Vec<PathBuf>,
    pub catalog_files_existing: usize,
}

impl BootstrapReport {
    pub fn changed_anything(&self) -> bool {
        !self.dirs_created.is_empty()
            || self.packages_file_created
            || !self.catalog_files_seeded.is_empty()
    }
}

/// Create the working directories and seed catalog files from the packages list
pub fn bootstrap(config: &WorkspaceConfig) -> Result<BootstrapReport> {
    let mut report = BootstrapReport::default();

    for dir in config.working_dirs() {
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|e| PnpError::io(&dir, e))?;
            debug!("Created directory {}", dir.display());
            report.dirs_created.push(dir);
        }
    }

    let packages = config.packages_path();
    if !packages.exists() {
        if let Some(parent) = packages.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PnpError::io(parent, e))?;
        }
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&packages)
            .map_err(|e| PnpError::io(&packages, e))?;
        report.packages_file_created = true;
    }

    let bytes = fs::read(&packages).map_err(|e| PnpError::io(&packages, e))?;
    let listing = String::from_utf8_lossy(&bytes);
    let catalog_dir = config.catalog_path();

    for line in listing.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let target = catalog_file_for(&catalog_dir, line, config.catalog_ext());
        if target.exists() {
            report.catalog_files_existing += 1;
            continue;
        }

        fs::write(&target, format!("{}\n", config.catalog_header))
            .map_err(|e| PnpError::io(&target, e))?;
        debug!("Seeded catalog file {}", target.display());
        report.catalog_files_seeded.push(target);
    }

    info!(
        "Workspace ready: {} directories created, {} catalog files seeded, {} already present",
        report.dirs_created.len(),
        report.catalog_files_seeded.len(),
        report.catalog_files_existing
    );
    Ok(report)
}

/// Catalog backing file for one packages-list entry
pub fn catalog_file_for(catalog_dir: &Path, package: &str, extension: &str) -> PathBuf {
    catalog_dir.join(format!("{}.{}", sanitize(package), extension))
}

/// Turn a package name into a safe file stem
pub fn sanitize(name: &str) -> String {
    if name.is_empty() {
        return UNKNOWN_PACKAGE_NAME.to_string();
    }
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
