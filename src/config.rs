//! Configuration management and validation.
//!
//! The working-directory layout and catalog conventions are process-wide
//! settings. They live in one explicit [`WorkspaceConfig`] value which is
//! passed to catalog loading, conversion and bootstrap instead of being read
//! from ambient constants.

use crate::constants::{
    CATALOG_DIR_NAME, CATALOG_EXTENSION, CATALOG_HEADER, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
    DOCUMENTS_DIR_NAME, INPUT_DIR_NAME, OUTPUT_DIR_NAME, PACKAGES_FILE, SETTINGS_DIR_NAME,
};
use crate::error::{PnpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Working-directory layout and catalog conventions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root that every relative directory below is resolved against
    pub root: PathBuf,

    /// Settings directory (holds the packages list)
    pub settings_dir: PathBuf,

    /// Directory scanned for tables to convert
    pub input_dir: PathBuf,

    /// Directory receiving converted tables
    pub output_dir: PathBuf,

    /// Directory of catalog backing files
    pub catalog_dir: PathBuf,

    /// Reference documentation directory
    pub documents_dir: PathBuf,

    /// Packages list used to seed catalog files
    pub packages_file: PathBuf,

    /// Extension of catalog backing files, without the dot
    pub catalog_extension: String,

    /// Title row of a freshly created catalog file
    pub catalog_header: String,

    /// Input extensions to accept; empty accepts every regular file
    pub input_extensions: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            settings_dir: PathBuf::from(SETTINGS_DIR_NAME),
            input_dir: PathBuf::from(INPUT_DIR_NAME),
            output_dir: PathBuf::from(OUTPUT_DIR_NAME),
            catalog_dir: PathBuf::from(CATALOG_DIR_NAME),
            documents_dir: PathBuf::from(DOCUMENTS_DIR_NAME),
            packages_file: PathBuf::from(PACKAGES_FILE),
            catalog_extension: CATALOG_EXTENSION.to_string(),
            catalog_header: CATALOG_HEADER.to_string(),
            input_extensions: Vec::new(),
        }
    }
}

impl WorkspaceConfig {
    /// Use a different workspace root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Restrict inputs to the given extensions
    pub fn with_input_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Default location of the configuration file
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PnpError::io(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|source| PnpError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config.normalized())
    }

    /// Load configuration using the layered approach (defaults -> file -> overrides)
    ///
    /// An explicit `config_file` must exist. Without one, the default location
    /// is used when present and built-in defaults otherwise.
    pub fn load_layered(config_file: Option<&Path>, root: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Some(root) = root {
            config.root = root;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.catalog_extension.trim_start_matches('.').is_empty() {
            return Err(PnpError::configuration(
                "catalog_extension must not be empty",
            ));
        }
        if self.catalog_header.trim().is_empty() {
            return Err(PnpError::configuration("catalog_header must not be empty"));
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.catalog_extension = strip_dot(&self.catalog_extension);
        self.input_extensions = self.input_extensions.iter().map(|e| strip_dot(e)).collect();
        self
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(&self.settings_dir)
    }

    pub fn input_path(&self) -> PathBuf {
        self.root.join(&self.input_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(&self.catalog_dir)
    }

    pub fn documents_path(&self) -> PathBuf {
        self.root.join(&self.documents_dir)
    }

    pub fn packages_path(&self) -> PathBuf {
        self.root.join(&self.packages_file)
    }

    /// All working directories, in creation order
    pub fn working_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.settings_path(),
            self.input_path(),
            self.output_path(),
            self.catalog_path(),
            self.documents_path(),
        ]
    }

    /// Catalog extension without a leading dot
    pub fn catalog_ext(&self) -> &str {
        self.catalog_extension.trim_start_matches('.')
    }

    /// Whether `path` passes the input extension filter
    pub fn accepts_input(&self, path: &Path) -> bool {
        if self.input_extensions.is_empty() {
            return true;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.input_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

fn strip_dot(ext: &str) -> String {
    ext.trim_start_matches('.').to_string()
}
