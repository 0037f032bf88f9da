//! Error taxonomy for the I/O boundary.
//!
//! Parsing problems never show up here: a line that cannot be split is
//! quarantined or emitted with an empty field, so only file-level failures
//! are surfaced to the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlossaryError {
    #[error("input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("delimited data error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("header pattern {pattern:?} does not compile: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{} is empty, nothing to sort", path.display())]
    EmptyInput { path: PathBuf },
}

impl GlossaryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GlossaryError::Io { path: path.into(), source }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        GlossaryError::Csv { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, GlossaryError>;
