//! Conversion scenario tests
//!
//! Exercise the complete file pipeline against temporary workspaces.

pub mod basic_conversion;
pub mod error_handling;

use crate::config::WorkspaceConfig;
use crate::constants::CATALOG_HEADER;
use crate::resolver::{DesignatorResolver, Resolution};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Workspace rooted in a temp dir with input, output and catalog directories
pub(crate) fn create_workspace(temp_dir: &TempDir) -> WorkspaceConfig {
    let config = WorkspaceConfig::default().with_root(temp_dir.path());
    fs::create_dir_all(config.input_path()).unwrap();
    fs::create_dir_all(config.catalog_path()).unwrap();
    config
}

/// Write a catalog backing file with the standard title row
pub(crate) fn write_catalog(config: &WorkspaceConfig, name: &str, rows: &[&str]) -> PathBuf {
    let path = config.catalog_path().join(name);
    let mut content = format!("{}\n", CATALOG_HEADER);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

/// Write an input table into the conversion directory
pub(crate) fn write_input(config: &WorkspaceConfig, name: &str, content: &str) -> PathBuf {
    let path = config.input_path().join(name);
    fs::write(&path, content).unwrap();
    path
}

pub(crate) fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Replays canned answers in order, declining once they run out
pub(crate) struct ScriptedResolver {
    answers: Vec<Resolution>,
    pub asked: Vec<String>,
    pub offered_files: Vec<Vec<PathBuf>>,
}

impl ScriptedResolver {
    pub(crate) fn new(answers: Vec<Resolution>) -> Self {
        Self {
            answers,
            asked: Vec::new(),
            offered_files: Vec::new(),
        }
    }
}

impl DesignatorResolver for ScriptedResolver {
    fn resolve(&mut self, designator: &str, catalog_files: &[PathBuf]) -> Resolution {
        self.asked.push(designator.to_string());
        self.offered_files.push(catalog_files.to_vec());
        if self.answers.is_empty() {
            Resolution::Declined
        } else {
            self.answers.remove(0)
        }
    }
}
