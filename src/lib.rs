//! Normalization of messy bilingual glossary dumps into clean
//! (source, target) pairs.

pub mod canonical;
pub mod classify;
pub mod collect;
pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod normalize;
pub mod pair;
pub mod pipeline;
pub mod sort;
pub mod transform;

pub use config::GlossaryConfig;
pub use error::{GlossaryError, Result};
pub use pair::{ExtractedRow, Pair, QuarantinedLine, Record};
