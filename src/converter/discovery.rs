//! Input discovery for the conversion directory.

use crate::config::WorkspaceConfig;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Regular files directly inside the input directory, sorted by name
///
/// Subdirectories are not searched. A missing directory yields no inputs.
pub fn discover_inputs(config: &WorkspaceConfig) -> Vec<PathBuf> {
    let input_dir = config.input_path();
    if !input_dir.is_dir() {
        debug!("Input directory {} not found", input_dir.display());
        return Vec::new();
    }

    let files: Vec<PathBuf> = WalkDir::new(&input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && config.accepts_input(e.path()))
        .map(|e| e.into_path())
        .collect();

    debug!(
        "Found {} input files in {}",
        files.len(),
        input_dir.display()
    );
    files
}

/// Resolve a user-supplied input: an existing path as given, else a name in the input directory
pub fn resolve_input(config: &WorkspaceConfig, name: &Path) -> PathBuf {
    if name.exists() {
        name.to_path_buf()
    } else {
        config.input_path().join(name)
    }
}
