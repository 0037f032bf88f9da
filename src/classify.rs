//! Line classification for raw OCR text.
//!
//! Decides which splitting rule applies to one trimmed, non-blank line.
//! Priority is fixed: a delimiter anywhere in the line wins (comma before
//! semicolon), then the whitespace token count decides.

/// Delimiters checked in priority order.
pub const DELIMITERS: [char; 2] = [',', ';'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Line contains a delimiter; sides of its first occurrence, untrimmed.
    Delimited {
        delimiter: char,
        left: &'a str,
        right: &'a str,
    },
    /// Exactly one whitespace-separated token and no delimiter.
    SingleToken(&'a str),
    /// Two or more whitespace-separated tokens and no delimiter.
    MultiToken(Vec<&'a str>),
}

pub fn classify(line: &str) -> LineClass<'_> {
    for delimiter in DELIMITERS {
        if let Some((left, right)) = line.split_once(delimiter) {
            return LineClass::Delimited { delimiter, left, right };
        }
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() == 1 {
        LineClass::SingleToken(tokens[0])
    } else {
        LineClass::MultiToken(tokens)
    }
}
