//! Pick-and-place Table Processor Library
//!
//! Converts semicolon-delimited pick-and-place tables exported by CAD tools
//! into a normalized form for placement machines.
//!
//! This library provides tools for:
//! - Normalizing cell values (punctuation clean-up, capacitor and resistor
//!   package canonicalization, Cyrillic look-alike replacement)
//! - Correcting capacitor and resistor rotations
//! - Mapping package designators to canonical names through an editable,
//!   file-backed component catalog
//! - Growing the catalog while converting, through an injected resolver
//! - Bootstrapping the working-directory layout

pub mod catalog;
pub mod config;
pub mod constants;
pub mod converter;
pub mod delimited;
pub mod error;
pub mod models;
pub mod normalize;
pub mod resolver;
pub mod transform;
pub mod workspace;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use catalog::{ComponentCatalog, LoadStats};
pub use config::WorkspaceConfig;
pub use converter::FileConverter;
pub use error::{PnpError, Result};
pub use models::{BatchSummary, ComponentEntry, ConversionStats, Record};
pub use normalize::CellNormalizer;
pub use resolver::{CatalogAddition, DecliningResolver, DesignatorResolver, Resolution};
pub use transform::RecordTransformer;
