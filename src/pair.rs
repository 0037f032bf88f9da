use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Trim surrounding whitespace and any wrapping double quotes.
pub fn clean_field(s: &str) -> String {
    s.trim().trim_matches('"').trim().to_string()
}

/// Case-insensitive identity of a pair, used for duplicate suppression.
/// Composed and decomposed spellings share a key.
pub type DedupKey = (String, String);

fn key_field(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// A (source, target) glossary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub source: String,
    pub target: String,
}

impl Pair {
    /// Build a pair from raw fields, cleaning both sides.
    pub fn new(source: &str, target: &str) -> Self {
        Pair {
            source: clean_field(source),
            target: clean_field(target),
        }
    }

    /// A pair with both fields empty carries nothing and is discarded.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty() && self.target.is_empty()
    }

    pub fn dedup_key(&self) -> DedupKey {
        (key_field(&self.source), key_field(&self.target))
    }

    pub fn into_fields(self) -> Vec<String> {
        vec![self.source, self.target]
    }
}

/// Four-field labeled pair: (source label, source term, target label, target term).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub source_label: String,
    pub source_term: String,
    pub target_label: String,
    pub target_term: String,
}

impl Record {
    pub fn new(source_label: &str, source_term: &str, target_label: &str, target_term: &str) -> Self {
        Record {
            source_label: source_label.to_string(),
            source_term: source_term.to_string(),
            target_label: target_label.to_string(),
            target_term: target_term.to_string(),
        }
    }

    /// Read the first four fields of a delimited row. Extra fields are ignored;
    /// rows shorter than four fields are not records.
    pub fn from_fields(fields: &[String]) -> Option<Self> {
        match fields {
            [a, b, c, d, ..] => Some(Record::new(a, b, c, d)),
            _ => None,
        }
    }

    pub fn into_fields(self) -> Vec<String> {
        vec![self.source_label, self.source_term, self.target_label, self.target_term]
    }
}

/// A raw line no extraction tier could decompose, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarantinedLine(pub String);

/// One output row of the tiered extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedRow {
    Pair(Pair),
    Quarantined(QuarantinedLine),
}

impl ExtractedRow {
    pub fn into_fields(self) -> Vec<String> {
        match self {
            ExtractedRow::Pair(pair) => pair.into_fields(),
            ExtractedRow::Quarantined(QuarantinedLine(line)) => vec![line],
        }
    }
}
