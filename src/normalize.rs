//! Raw-line pairing: the separator and token-heuristic splitters.
//!
//! Lines are walked with an explicit cursor because some rules consume the
//! following physical line as the target term. Every [`Split`] records how
//! many input lines it consumed, so the total always equals the number of
//! non-blank input lines.

use crate::classify::{classify, LineClass};
use crate::collect::{Collected, PairCollector};
use crate::pair::Pair;
use tracing::debug;

/// Trimmed, non-blank lines with a read position.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Blank lines are dropped here and never reach the classifier.
    pub fn new<S: AsRef<str>>(raw: &'a [S]) -> Self {
        let lines = raw
            .iter()
            .map(|line| line.as_ref().trim())
            .filter(|line| !line.is_empty())
            .collect();
        LineCursor { lines, pos: 0 }
    }

    pub fn current(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// The line after the current one, without consuming it.
    pub fn lookahead(&self) -> Option<&'a str> {
        self.lines.get(self.pos + 1).copied()
    }

    pub fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.lines.len());
    }

    pub fn consumed(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Which rule produced a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    /// Both sides of the first delimiter were non-empty.
    Separator(char),
    /// Delimiter with an empty right side; target taken from the next line.
    SeparatorNextLine(char),
    /// Single token; target taken from the next line.
    LoneToken,
    /// Multi-token line bisected at the token midpoint.
    Midpoint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub pair: Pair,
    pub consumed: usize,
    pub rule: SplitRule,
}

/// Separator rule. `left`/`right` are the raw sides of the first delimiter.
pub fn split_delimited(delimiter: char, left: &str, right: &str, next: Option<&str>) -> Split {
    if !right.trim().is_empty() {
        return Split {
            pair: Pair::new(left, right),
            consumed: 1,
            rule: SplitRule::Separator(delimiter),
        };
    }

    let (target, consumed) = borrow_target(next);
    Split {
        pair: Pair::new(left, target),
        consumed,
        rule: SplitRule::SeparatorNextLine(delimiter),
    }
}

/// Single-token rule: the next line is taken whole as the target, whatever its shape.
pub fn split_lone_token(token: &str, next: Option<&str>) -> Split {
    let (target, consumed) = borrow_target(next);
    Split {
        pair: Pair::new(token, target),
        consumed,
        rule: SplitRule::LoneToken,
    }
}

/// Multi-token rule: first floor(n/2) tokens are the source, the rest the target.
///
/// This is approximate. A phrase whose real boundary is not at the token
/// midpoint comes out wrong and is left for manual correction downstream.
pub fn split_midpoint(tokens: &[&str]) -> Split {
    let mid = tokens.len() / 2;
    let source = tokens[..mid].join(" ");
    let target = tokens[mid..].join(" ");
    Split {
        pair: Pair::new(&source, &target),
        consumed: 1,
        rule: SplitRule::Midpoint,
    }
}

fn borrow_target(next: Option<&str>) -> (&str, usize) {
    match next {
        Some(line) => (line, 2),
        None => ("", 1),
    }
}

/// Iterator of splits over a cursor. Each step emits exactly one pair.
pub struct PairSplitter<'a> {
    cursor: LineCursor<'a>,
}

impl<'a> PairSplitter<'a> {
    pub fn new(cursor: LineCursor<'a>) -> Self {
        PairSplitter { cursor }
    }

    pub fn consumed(&self) -> usize {
        self.cursor.consumed()
    }
}

impl<'a> Iterator for PairSplitter<'a> {
    type Item = Split;

    fn next(&mut self) -> Option<Split> {
        let line = self.cursor.current()?;
        let next = self.cursor.lookahead();

        let split = match classify(line) {
            LineClass::Delimited { delimiter, left, right } => {
                split_delimited(delimiter, left, right, next)
            }
            LineClass::SingleToken(token) => split_lone_token(token, next),
            LineClass::MultiToken(tokens) => split_midpoint(&tokens),
        };

        debug!(line, rule = ?split.rule, consumed = split.consumed, "split line");
        self.cursor.advance(split.consumed);
        Some(split)
    }
}

/// Per-rule tallies for one normalization run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitStats {
    pub lines: usize,
    pub consumed: usize,
    pub separator: usize,
    pub separator_next_line: usize,
    pub lone_token: usize,
    pub midpoint: usize,
    /// Pairs that ran out of input and kept an empty target.
    pub unpaired: usize,
}

impl SplitStats {
    fn record(&mut self, split: &Split) {
        self.consumed += split.consumed;
        match split.rule {
            SplitRule::Separator(_) => self.separator += 1,
            SplitRule::SeparatorNextLine(_) => self.separator_next_line += 1,
            SplitRule::LoneToken => self.lone_token += 1,
            SplitRule::Midpoint => self.midpoint += 1,
        }
        if split.pair.target.is_empty() {
            self.unpaired += 1;
        }
    }
}

#[derive(Debug)]
pub struct Normalized {
    pub collected: Collected<Pair>,
    pub stats: SplitStats,
}

/// Split raw lines into pairs and collect them (empty pairs and duplicates dropped).
pub fn normalize_lines<S: AsRef<str>>(raw: &[S]) -> Normalized {
    let cursor = LineCursor::new(raw);
    let mut stats = SplitStats {
        lines: cursor.len(),
        ..SplitStats::default()
    };

    let mut collector = PairCollector::new();
    for split in PairSplitter::new(cursor) {
        stats.record(&split);
        collector.push(split.pair);
    }

    Normalized {
        collected: collector.finish(),
        stats,
    }
}
