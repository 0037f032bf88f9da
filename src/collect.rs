//! Pair collection: drop empty pairs, suppress case-insensitive duplicates,
//! keep first-seen order.

use crate::pair::{DedupKey, ExtractedRow, Pair};
use std::collections::HashSet;
use tracing::debug;

/// Ordered, deduplicated output of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected<T> {
    pub items: Vec<T>,
    pub emitted: usize,
    pub dropped_empty: usize,
    pub duplicates: usize,
}

#[derive(Debug, Default)]
pub struct PairCollector {
    seen: HashSet<DedupKey>,
    pairs: Vec<Pair>,
    dropped_empty: usize,
    duplicates: usize,
}

impl PairCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the pair was kept.
    pub fn push(&mut self, pair: Pair) -> bool {
        if pair.is_empty() {
            self.dropped_empty += 1;
            return false;
        }
        if !self.seen.insert(pair.dedup_key()) {
            debug!(source = %pair.source, target = %pair.target, "duplicate pair skipped");
            self.duplicates += 1;
            return false;
        }
        self.pairs.push(pair);
        true
    }

    pub fn finish(self) -> Collected<Pair> {
        Collected {
            emitted: self.pairs.len(),
            items: self.pairs,
            dropped_empty: self.dropped_empty,
            duplicates: self.duplicates,
        }
    }
}

pub fn collect_pairs(pairs: impl IntoIterator<Item = Pair>) -> Collected<Pair> {
    let mut collector = PairCollector::new();
    for pair in pairs {
        collector.push(pair);
    }
    collector.finish()
}

/// Collect extractor output. Pairs go through the same dedup as raw pairing;
/// quarantined lines are always kept, in place, so none disappears.
pub fn collect_rows(rows: impl IntoIterator<Item = ExtractedRow>) -> Collected<ExtractedRow> {
    let mut collector = PairCollector::new();
    let mut items = Vec::new();

    for row in rows {
        match row {
            ExtractedRow::Pair(pair) => {
                if collector.push(pair.clone()) {
                    items.push(ExtractedRow::Pair(pair));
                }
            }
            quarantined @ ExtractedRow::Quarantined(_) => items.push(quarantined),
        }
    }

    let pairs = collector.finish();
    Collected {
        emitted: items.len(),
        items,
        dropped_empty: pairs.dropped_empty,
        duplicates: pairs.duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::QuarantinedLine;

    #[test]
    fn keeps_first_occurrence_case() {
        let result = collect_pairs(vec![
            Pair::new("Hello", "Bonjour"),
            Pair::new("hello", "BONJOUR"),
        ]);
        assert_eq!(result.items, vec![Pair::new("Hello", "Bonjour")]);
        assert_eq!(result.emitted, 1);
        assert_eq!(result.duplicates, 1);
    }

    #[test]
    fn drops_empty_pairs() {
        let result = collect_pairs(vec![Pair::new("", ""), Pair::new("apple", "")]);
        assert_eq!(result.items, vec![Pair::new("apple", "")]);
        assert_eq!(result.dropped_empty, 1);
    }

    #[test]
    fn preserves_arrival_order() {
        let result = collect_pairs(vec![
            Pair::new("b", "2"),
            Pair::new("a", "1"),
            Pair::new("c", "3"),
        ]);
        let sources: Vec<&str> = result.items.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, vec!["b", "a", "c"]);
    }

    #[test]
    fn differing_target_is_not_a_duplicate() {
        let result = collect_pairs(vec![Pair::new("bank", "pankki"), Pair::new("bank", "penkki")]);
        assert_eq!(result.emitted, 2);
    }

    #[test]
    fn collecting_twice_changes_nothing() {
        let once = collect_pairs(vec![
            Pair::new("a", "1"),
            Pair::new("A", "1"),
            Pair::new("", ""),
            Pair::new("b", "2"),
        ]);
        let twice = collect_pairs(once.items.clone());
        assert_eq!(twice.items, once.items);
        assert_eq!(twice.duplicates, 0);
        assert_eq!(twice.dropped_empty, 0);
    }

    #[test]
    fn rows_keep_quarantined_lines_in_place() {
        let result = collect_rows(vec![
            ExtractedRow::Pair(Pair::new("a", "1")),
            ExtractedRow::Quarantined(QuarantinedLine("???".to_string())),
            ExtractedRow::Pair(Pair::new("A", "1")),
            ExtractedRow::Quarantined(QuarantinedLine("???".to_string())),
        ]);
        assert_eq!(
            result.items,
            vec![
                ExtractedRow::Pair(Pair::new("a", "1")),
                ExtractedRow::Quarantined(QuarantinedLine("???".to_string())),
                ExtractedRow::Quarantined(QuarantinedLine("???".to_string())),
            ]
        );
        assert_eq!(result.duplicates, 1);
        assert_eq!(result.emitted, 3);
    }
}
