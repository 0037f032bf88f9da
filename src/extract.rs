//! Tiered word/definition extraction for delimiter-structured input.
//!
//! Each line goes through the tiers in order until one succeeds:
//! structured parse of one delimited record, then a first-token regex
//! split, then quarantine. Tiers never fail outward.

use crate::config::{delimiter_byte, GlossaryConfig};
use crate::error::{GlossaryError, Result};
use crate::pair::{ExtractedRow, Pair, QuarantinedLine};
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

lazy_static! {
    // First token is a maximal run without spaces or commas; the rest follows one separator.
    static ref WORD_REST: Regex = Regex::new(r"^([^, ]+)[ ,](.+)$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Structured,
    WordRest,
}

type TierFn = fn(&str, u8) -> Option<(String, String)>;

const TIERS: [(Tier, TierFn); 2] = [
    (Tier::Structured, parse_structured),
    (Tier::WordRest, split_word_rest),
];

/// Parse the line as a single delimited, optionally quoted record.
/// Succeeds only on exactly two fields.
pub fn parse_structured(line: &str, delimiter: u8) -> Option<(String, String)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) if record.len() == 2 => {
            Some((record[0].trim().to_string(), record[1].trim().to_string()))
        }
        _ => None,
    }
}

/// Split off the first token as the word; the delimiter argument is unused
/// because this tier always accepts a space or a comma.
pub fn split_word_rest(line: &str, _delimiter: u8) -> Option<(String, String)> {
    let caps = WORD_REST.captures(line)?;
    Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
}

/// Result of running one line through the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    Header,
    Extracted(Tier, Pair),
    Quarantined(QuarantinedLine),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractStats {
    pub lines: usize,
    pub blank: usize,
    pub headers: usize,
    pub structured: usize,
    pub word_rest: usize,
    pub quarantined: usize,
}

impl ExtractStats {
    fn record(&mut self, outcome: &LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::Blank => self.blank += 1,
            LineOutcome::Header => self.headers += 1,
            LineOutcome::Extracted(Tier::Structured, _) => self.structured += 1,
            LineOutcome::Extracted(Tier::WordRest, _) => self.word_rest += 1,
            LineOutcome::Quarantined(_) => self.quarantined += 1,
        }
    }

    pub fn merge(&mut self, other: &ExtractStats) {
        self.lines += other.lines;
        self.blank += other.blank;
        self.headers += other.headers;
        self.structured += other.structured;
        self.word_rest += other.word_rest;
        self.quarantined += other.quarantined;
    }
}

pub struct Extractor {
    headers: Vec<Regex>,
    delimiter: u8,
}

impl Extractor {
    pub fn new(header_patterns: &[String], delimiter: char) -> Result<Self> {
        let headers = header_patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| GlossaryError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Extractor {
            headers,
            delimiter: delimiter_byte(delimiter),
        })
    }

    pub fn from_config(config: &GlossaryConfig) -> Result<Self> {
        Self::new(&config.header_patterns, config.structured_delimiter)
    }

    pub fn is_header(&self, line: &str) -> bool {
        self.headers.iter().any(|re| re.is_match(line))
    }

    pub fn extract_line(&self, raw: &str) -> LineOutcome {
        let line = raw.trim();
        if line.is_empty() {
            return LineOutcome::Blank;
        }
        if self.is_header(line) {
            return LineOutcome::Header;
        }

        let hit = TIERS
            .iter()
            .find_map(|(tier, apply)| apply(line, self.delimiter).map(|fields| (*tier, fields)));

        match hit {
            Some((tier, (word, definition))) => {
                debug!(line, ?tier, "extracted pair");
                // Definitions must stay safely re-quotable.
                let definition = definition.replace('"', "'");
                LineOutcome::Extracted(tier, Pair { source: word, target: definition })
            }
            None => {
                warn!(line, "no tier could split line, quarantined");
                LineOutcome::Quarantined(QuarantinedLine(line.to_string()))
            }
        }
    }

    /// Extract every line, in order. Blank and header lines produce no row.
    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S], stats: &mut ExtractStats) -> Vec<ExtractedRow> {
        let mut rows = Vec::new();
        for line in lines {
            let outcome = self.extract_line(line.as_ref());
            stats.record(&outcome);
            match outcome {
                LineOutcome::Extracted(_, pair) => rows.push(ExtractedRow::Pair(pair)),
                LineOutcome::Quarantined(q) => rows.push(ExtractedRow::Quarantined(q)),
                LineOutcome::Blank | LineOutcome::Header => {}
            }
        }
        rows
    }
}
