//! Per-record transformation.
//!
//! Applies, in order: normalization of every fifth field, the rotation fix
//! for capacitors and resistors, designator resolution against the catalog,
//! and a final normalization of every field of a kept record.

use crate::catalog::ComponentCatalog;
use crate::constants::{
    DESIGNATOR_FIELD_INDEX, NORMALIZED_FIELD_STRIDE, ROTATED_COMPONENT_PREFIXES,
    ROTATION_FIELD_INDEX, ROTATION_REWRITES,
};
use crate::delimited::trim_blanks;
use crate::models::{ComponentEntry, DesignatorOutcome, Record, RowOutcome};
use crate::normalize::CellNormalizer;
use crate::resolver::{DesignatorResolver, Resolution};
use tracing::{debug, warn};

/// Transforms records one at a time
#[derive(Debug, Clone, Copy)]
pub struct RecordTransformer<'a> {
    normalizer: &'a CellNormalizer,
}

impl<'a> RecordTransformer<'a> {
    pub fn new(normalizer: &'a CellNormalizer) -> Self {
        Self { normalizer }
    }

    /// Transform one record; never fails
    ///
    /// An unknown designator is passed to `resolver`. An approved addition is
    /// appended to the catalog before it is applied, so later records see it.
    pub fn transform(
        &self,
        mut record: Record,
        catalog: &mut ComponentCatalog,
        resolver: &mut dyn DesignatorResolver,
    ) -> RowOutcome {
        self.normalize_strided_fields(&mut record);
        fix_rotation(&mut record);

        let (designator, catalog_added) = resolve_designator(&mut record, catalog, resolver);
        let drop = designator == DesignatorOutcome::Deleted;

        if !drop {
            for field in record.fields_mut() {
                *field = self.normalizer.normalize(field);
            }
        }

        RowOutcome {
            record,
            drop,
            designator,
            catalog_added,
        }
    }

    fn normalize_strided_fields(&self, record: &mut Record) {
        for (i, field) in record.fields_mut().iter_mut().enumerate() {
            if (i + 1) % NORMALIZED_FIELD_STRIDE == 0 {
                *field = self.normalizer.normalize(field);
            }
        }
    }
}

/// Correct the rotation of `C*`/`R*` components; returns whether it changed
pub fn fix_rotation(record: &mut Record) -> bool {
    if record.len() <= ROTATION_FIELD_INDEX {
        return false;
    }

    let rotated_class = record
        .field(0)
        .and_then(|name| name.chars().next())
        .is_some_and(|c| ROTATED_COMPONENT_PREFIXES.contains(&c.to_ascii_uppercase()));
    if !rotated_class {
        return false;
    }

    let fields = record.fields_mut();
    let angle = trim_blanks(&fields[ROTATION_FIELD_INDEX]);
    match ROTATION_REWRITES.iter().find(|(from, _)| *from == angle) {
        Some((_, to)) => {
            fields[ROTATION_FIELD_INDEX] = to.to_string();
            true
        }
        None => false,
    }
}

/// Resolve the designator field; returns the outcome and whether the catalog grew
fn resolve_designator(
    record: &mut Record,
    catalog: &mut ComponentCatalog,
    resolver: &mut dyn DesignatorResolver,
) -> (DesignatorOutcome, bool) {
    let Some(raw) = record.field(DESIGNATOR_FIELD_INDEX) else {
        return (DesignatorOutcome::Absent, false);
    };
    let designator = trim_blanks(raw).to_string();

    if let Some(entry) = catalog.lookup(&designator).cloned() {
        return (apply_entry(record, &entry), false);
    }

    match resolver.resolve(&designator, catalog.files()) {
        Resolution::Declined => {
            debug!("Designator '{}' left unresolved", designator);
            (DesignatorOutcome::Declined, false)
        }
        Resolution::Add(addition) => {
            match catalog.append(
                &addition.target_file,
                &addition.non_standard,
                &addition.standard_name,
                addition.delete,
            ) {
                Ok(entry) => (apply_entry(record, &entry), true),
                Err(e) => {
                    warn!("Could not add '{}' to the catalog: {}", designator, e);
                    (DesignatorOutcome::Declined, false)
                }
            }
        }
    }
}

fn apply_entry(record: &mut Record, entry: &ComponentEntry) -> DesignatorOutcome {
    if entry.delete {
        DesignatorOutcome::Deleted
    } else if !entry.standard_name.is_empty() {
        record.fields_mut()[DESIGNATOR_FIELD_INDEX] = entry.standard_name.clone();
        DesignatorOutcome::Replaced
    } else {
        DesignatorOutcome::Unchanged
    }
}
