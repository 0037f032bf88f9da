//! File-to-file runs of the engine. Each run loads its whole input, builds
//! the whole output in memory and only then replaces the destination.

use crate::canonical::{canonicalize_rows, CanonicalStats};
use crate::collect::collect_rows;
use crate::config::{delimiter_byte, GlossaryConfig};
use crate::error::{GlossaryError, Result};
use crate::extract::{ExtractStats, Extractor};
use crate::io::{self, OutputFormat};
use crate::normalize::{normalize_lines, SplitStats};
use crate::pair::Pair;
use crate::sort::{sort_key, sort_with_header};
use crate::transform::{label_pairs, prefix_text};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub split: SplitStats,
    pub emitted: usize,
    pub duplicates: usize,
    pub dropped_empty: usize,
}

/// Raw OCR text to deduplicated pairs.
pub fn normalize_file(input: &Path, output: &Path, format: OutputFormat, sort: bool) -> Result<NormalizeSummary> {
    let lines = io::read_lines(input)?;
    let normalized = normalize_lines(&lines);
    let mut pairs = normalized.collected.items;

    if sort {
        sort_pairs(&mut pairs, output)?;
    }

    let bytes = io::encode_pairs(&pairs, format, output)?;
    io::write_atomic(output, &bytes)?;

    info!(
        input = %input.display(),
        pairs = normalized.collected.emitted,
        duplicates = normalized.collected.duplicates,
        "normalized"
    );

    Ok(NormalizeSummary {
        split: normalized.stats,
        emitted: normalized.collected.emitted,
        duplicates: normalized.collected.duplicates,
        dropped_empty: normalized.collected.dropped_empty,
    })
}

/// Stable sort by the key the quoted output line of each pair would have.
fn sort_pairs(pairs: &mut Vec<Pair>, path: &Path) -> Result<()> {
    let encoded = io::encode_pairs(pairs, OutputFormat::Csv, path)?;
    let text = String::from_utf8_lossy(&encoded);
    let keys: Vec<String> = text.lines().map(sort_key).collect();

    let mut keyed: Vec<(String, Pair)> = keys.into_iter().zip(pairs.drain(..)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    pairs.extend(keyed.into_iter().map(|(_, pair)| pair));
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidateSummary {
    pub files: Vec<PathBuf>,
    pub extract: ExtractStats,
    pub emitted: usize,
    pub duplicates: usize,
}

/// Run the tiered extractor over every matching file in `dir` and write one
/// consolidated, deduplicated file.
pub fn consolidate_dir(
    dir: &Path,
    output: &Path,
    config: &GlossaryConfig,
    format: OutputFormat,
    progress: &ProgressBar,
) -> Result<ConsolidateSummary> {
    let extractor = Extractor::from_config(config)?;
    let files = io::discover_files(dir, &config.input_extension)?;

    progress.set_length(files.len() as u64);
    let mut stats = ExtractStats::default();
    let mut rows = Vec::new();

    for file in &files {
        progress.set_message(file.display().to_string());
        let lines = io::read_lines(file)?;
        let mut file_stats = ExtractStats::default();
        rows.extend(extractor.extract_lines(&lines, &mut file_stats));
        info!(
            file = %file.display(),
            lines = file_stats.lines,
            quarantined = file_stats.quarantined,
            "extracted"
        );
        stats.merge(&file_stats);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let collected = collect_rows(rows);
    let bytes = io::encode_extracted(&collected.items, format, output)?;
    io::write_atomic(output, &bytes)?;

    Ok(ConsolidateSummary {
        files,
        extract: stats,
        emitted: collected.emitted,
        duplicates: collected.duplicates,
    })
}

/// Swap reversed four-field records so `language` is always the source.
/// The first row is treated as a header and kept as is when `has_header`.
pub fn canonicalize_file(
    input: &Path,
    output: &Path,
    language: &str,
    delimiter: char,
    has_header: bool,
) -> Result<CanonicalStats> {
    let delimiter = delimiter_byte(delimiter);
    let mut rows = io::read_rows(input, delimiter)?;

    let body_start = if has_header { 1.min(rows.len()) } else { 0 };
    let stats = canonicalize_rows(&mut rows[body_start..], language);

    let bytes = io::encode_rows(rows, delimiter, output)?;
    io::write_atomic(output, &bytes)?;

    info!(swapped = stats.swapped, language, "canonicalized");
    Ok(stats)
}

/// Resort a quoted file by its second field, header first. Returns the
/// number of body lines.
pub fn sort_file(input: &Path, output: &Path) -> Result<usize> {
    let lines = io::read_lines(input)?;
    if lines.is_empty() {
        return Err(GlossaryError::EmptyInput { path: input.to_path_buf() });
    }

    let sorted = sort_with_header(lines);
    io::write_atomic(output, &io::encode_lines(&sorted))?;

    let body = sorted.len() - 1;
    info!(rows = body, "sorted");
    Ok(body)
}

/// Expand two-column pairs into labeled four-field records.
pub fn label_file(input: &Path, output: &Path, source_label: &str, target_label: &str) -> Result<usize> {
    let rows = io::read_rows(input, b',')?;
    let records = label_pairs(&rows, source_label, target_label);
    let count = records.len();

    let bytes = io::encode_rows(records.into_iter().map(|r| r.into_fields()), b',', output)?;
    io::write_atomic(output, &bytes)?;

    info!(records = count, "labeled");
    Ok(count)
}

/// Prefix every line of a file with a literal string, keeping its line
/// endings byte for byte.
pub fn prefix_file(input: &Path, output: &Path, prefix: &str) -> Result<usize> {
    let text = io::read_text(input)?;
    let (prefixed, count) = prefix_text(&text, prefix);
    io::write_atomic(output, prefixed.as_bytes())?;

    info!(lines = count, "prefixed");
    Ok(count)
}
