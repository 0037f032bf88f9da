//! File boundary: loading input text, discovering input files, encoding
//! output rows and replacing the destination in one step.

use crate::error::{GlossaryError, Result};
use crate::pair::{ExtractedRow, Pair, QuarantinedLine};
use bzip2::read::BzDecoder;
use clap::ValueEnum;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Output encoding for pair files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Always-quoted delimited lines: "source","target"
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// Read a whole input file as text, unchanged apart from decoding. `.bz2`
/// paths are decompressed; malformed UTF-8 is replaced rather than rejected.
pub fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(GlossaryError::MissingInput { path: path.to_path_buf() });
    }

    let file = File::open(path).map_err(|e| GlossaryError::io(path, e))?;
    let mut reader: Box<dyn Read> = if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| GlossaryError::io(path, e))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = read_text(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Read delimited rows of any width. Blank lines yield no row.
pub fn read_rows(path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let text = read_text(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| GlossaryError::csv(path, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Files directly inside `dir` with the given extension, in path order.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(GlossaryError::MissingInput { path: dir.to_path_buf() });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| GlossaryError::io(dir, e))? {
        let path = entry.map_err(|e| GlossaryError::io(dir, e))?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Encode rows with every field quoted. Rows may differ in width.
pub fn encode_rows<I>(rows: I, delimiter: u8, path: &Path) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(&row)
            .map_err(|e| GlossaryError::csv(path, e))?;
    }
    writer
        .into_inner()
        .map_err(|e| GlossaryError::io(path, e.into_error()))
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonRow<'a> {
    Pair(&'a Pair),
    Quarantined { quarantined: &'a str },
}

fn encode_json_rows<'a>(rows: impl IntoIterator<Item = JsonRow<'a>>, path: &Path) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for row in rows {
        serde_json::to_writer(&mut out, &row).map_err(|e| GlossaryError::io(path, e.into()))?;
        out.push(b'\n');
    }
    Ok(out)
}

pub fn encode_pairs(pairs: &[Pair], format: OutputFormat, path: &Path) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => encode_rows(pairs.iter().cloned().map(Pair::into_fields), b',', path),
        OutputFormat::Jsonl => encode_json_rows(pairs.iter().map(JsonRow::Pair), path),
    }
}

pub fn encode_extracted(rows: &[ExtractedRow], format: OutputFormat, path: &Path) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => encode_rows(rows.iter().cloned().map(ExtractedRow::into_fields), b',', path),
        OutputFormat::Jsonl => encode_json_rows(
            rows.iter().map(|row| match row {
                ExtractedRow::Pair(pair) => JsonRow::Pair(pair),
                ExtractedRow::Quarantined(QuarantinedLine(line)) => JsonRow::Quarantined { quarantined: line },
            }),
            path,
        ),
    }
}

/// Newline-terminated lines.
pub fn encode_lines<S: AsRef<str>>(lines: &[S]) -> Vec<u8> {
    let mut out = Vec::new();
    for line in lines {
        out.extend_from_slice(line.as_ref().as_bytes());
        out.push(b'\n');
    }
    out
}

/// Write `contents` to a temporary file beside `path`, then rename it over
/// `path`. The destination is either untouched or fully replaced.
///
/// A replaced file keeps its permissions; a new one gets the usual 0644
/// rather than the temporary file's private mode.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| GlossaryError::io(dir, e))?;
    tmp.write_all(contents).map_err(|e| GlossaryError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| GlossaryError::io(tmp.path(), e))?;

    if let Some(permissions) = output_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| GlossaryError::io(tmp.path(), e))?;
    }

    tmp.persist(path).map_err(|e| GlossaryError::io(path, e.error))?;
    Ok(())
}

fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(meta) = fs::metadata(path) {
        return Some(meta.permissions());
    }
    default_permissions()
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
