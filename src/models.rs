//! Core data structures for placement-table processing.
//!
//! Defines records, catalog entries, per-row outcomes and the statistics
//! reported for single-file and batch conversions.

use crate::constants::FIELD_DELIMITER;
use crate::delimited::{join_fields, split_fields};
use std::path::PathBuf;
use std::time::Duration;

/// One placement row: ordered field values split from a single line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Split a line on the field delimiter without quote handling
    pub fn parse(line: &str) -> Self {
        Self::new(split_fields(line))
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [String] {
        &mut self.fields
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize with output quoting, without a line terminator
    pub fn to_line(&self) -> String {
        join_fields(&self.fields, FIELD_DELIMITER)
    }
}

impl From<&[&str]> for Record {
    fn from(fields: &[&str]) -> Self {
        Self::new(fields.iter().map(|f| f.to_string()).collect())
    }
}

/// Catalog mapping for one non-standard designator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEntry {
    /// Lowercased non-standard designator
    pub key: String,
    /// Canonical name; empty means "keep as is"
    pub standard_name: String,
    /// Rows carrying this designator are removed from output
    pub delete: bool,
}

impl ComponentEntry {
    pub fn new(non_standard: &str, standard_name: impl Into<String>, delete: bool) -> Self {
        Self {
            key: catalog_key(non_standard),
            standard_name: standard_name.into(),
            delete,
        }
    }
}

/// Lookup key for a designator
pub fn catalog_key(designator: &str) -> String {
    designator.to_lowercase()
}

/// What designator resolution did to a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignatorOutcome {
    /// Row has no designator field
    Absent,
    /// Replaced by a catalog standard name
    Replaced,
    /// Known to the catalog with an empty standard name
    Unchanged,
    /// Unknown and the operator declined to add it
    Declined,
    /// Catalog marks it for deletion; row dropped
    Deleted,
}

/// Result of transforming one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub record: Record,
    pub drop: bool,
    pub designator: DesignatorOutcome,
    /// An entry was added to the catalog while resolving this row
    pub catalog_added: bool,
}

/// Statistics for converting one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub lines_in: usize,
    pub lines_out: usize,
    pub rows_dropped: usize,
    pub designators_replaced: usize,
    pub designators_declined: usize,
    pub catalog_additions: usize,
}

impl ConversionStats {
    pub(crate) fn record(&mut self, outcome: &RowOutcome) {
        self.lines_in += 1;
        if outcome.drop {
            self.rows_dropped += 1;
        } else {
            self.lines_out += 1;
        }
        match outcome.designator {
            DesignatorOutcome::Replaced => self.designators_replaced += 1,
            DesignatorOutcome::Declined => self.designators_declined += 1,
            _ => {}
        }
        if outcome.catalog_added {
            self.catalog_additions += 1;
        }
    }
}

/// Outcome of converting several files one after another
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: Vec<ConversionStats>,
    pub failed: Vec<(PathBuf, String)>,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.converted.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn lines_in(&self) -> usize {
        self.converted.iter().map(|s| s.lines_in).sum()
    }

    pub fn lines_out(&self) -> usize {
        self.converted.iter().map(|s| s.lines_out).sum()
    }
}
