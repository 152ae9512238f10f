//! Resolution of designators the catalog does not know yet.
//!
//! The record transformer never talks to a terminal itself. It hands unknown
//! designators to an injected [`DesignatorResolver`], which either declines
//! or proposes a catalog addition. The interactive implementation lives in
//! `cli::input`; tests drive the transformer with scripted resolvers.

use std::path::{Path, PathBuf};

/// Entry the operator approved for addition to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAddition {
    /// Backing file that receives the new row
    pub target_file: PathBuf,
    /// Designator exactly as found in the record
    pub non_standard: String,
    /// Canonical name to substitute
    pub standard_name: String,
    /// Drop rows carrying this designator
    pub delete: bool,
}

/// Outcome of asking about an unknown designator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Declined,
    Add(CatalogAddition),
}

/// Capability to resolve a designator missing from the catalog
///
/// Calls block until an answer is available; there is no timeout.
pub trait DesignatorResolver {
    /// Decide what to do with `designator`, choosing among `catalog_files`
    fn resolve(&mut self, designator: &str, catalog_files: &[PathBuf]) -> Resolution;
}

impl<R: DesignatorResolver + ?Sized> DesignatorResolver for &mut R {
    fn resolve(&mut self, designator: &str, catalog_files: &[PathBuf]) -> Resolution {
        (**self).resolve(designator, catalog_files)
    }
}

/// Resolver for unattended runs: every unknown designator is left unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct DecliningResolver;

impl DesignatorResolver for DecliningResolver {
    fn resolve(&mut self, _designator: &str, _catalog_files: &[PathBuf]) -> Resolution {
        Resolution::Declined
    }
}

/// File name shown to the operator for a backing file
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
