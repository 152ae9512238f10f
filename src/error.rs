//! Error handling for placement-table processing.
//!
//! Only file-level operations can fail: opening, creating or appending to a
//! file, plus configuration loading. Row and cell transformations are total
//! and never produce an error.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PnpError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid normalization rule pattern: {0}")]
    RulePattern(#[from] regex::Error),

    #[error("Invalid catalog file pattern: {0}")]
    CatalogPattern(#[from] glob::PatternError),
}

impl PnpError {
    /// Create an I/O error tied to the path that caused it
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PnpError>;
