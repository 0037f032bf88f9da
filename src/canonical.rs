//! Column-order canonicalization for four-field records.
//!
//! A record whose target label is the canonical language, while its source
//! label is not, has its two (label, term) halves swapped. Records are
//! never reordered, merged or dropped.

use crate::pair::Record;
use tracing::{debug, warn};

impl Record {
    /// True when the record is reversed with respect to `canonical`.
    pub fn is_reversed(&self, canonical: &str) -> bool {
        self.source_label != canonical && self.target_label == canonical
    }

    /// Swap halves if reversed. Returns whether a swap happened.
    pub fn canonicalize(&mut self, canonical: &str) -> bool {
        if !self.is_reversed(canonical) {
            return false;
        }
        std::mem::swap(&mut self.source_label, &mut self.target_label);
        std::mem::swap(&mut self.source_term, &mut self.target_term);
        debug!(term = %self.source_term, "swapped reversed record");
        true
    }
}

/// Canonicalize every record in place; returns the number swapped.
pub fn canonicalize_records(records: &mut [Record], canonical: &str) -> usize {
    records
        .iter_mut()
        .map(|record| record.canonicalize(canonical))
        .filter(|&swapped| swapped)
        .count()
}

/// Canonicalize delimited rows in place. Rows with fewer than four fields
/// are left as they are; fields past the fourth are dropped from swapped rows.
pub fn canonicalize_rows(rows: &mut [Vec<String>], canonical: &str) -> CanonicalStats {
    let mut stats = CanonicalStats::default();
    for row in rows.iter_mut() {
        match Record::from_fields(row) {
            Some(mut record) => {
                stats.records += 1;
                if record.canonicalize(canonical) {
                    stats.swapped += 1;
                    *row = record.into_fields();
                }
            }
            None => {
                warn!(fields = row.len(), "row has fewer than four fields, left unchanged");
                stats.passed_through += 1;
            }
        }
    }
    stats
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CanonicalStats {
    pub records: usize,
    pub swapped: usize,
    pub passed_through: usize,
}
