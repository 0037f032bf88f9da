//! Small line and row transforms used when preparing glossary files.

use crate::pair::Record;

/// Prepend `prefix` to every line, blank lines included. Line endings are
/// kept as they are, so CRLF stays CRLF and a missing final newline stays
/// missing. Returns the text and the number of lines.
pub fn prefix_text(text: &str, prefix: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    for line in text.split_inclusive('\n') {
        out.push_str(prefix);
        out.push_str(line);
        count += 1;
    }
    (out, count)
}

/// Turn two-column pair rows into labeled four-field records.
///
/// Empty rows are skipped. A one-column row gets an empty translation;
/// columns past the first are trimmed and re-joined with commas.
pub fn label_pairs(rows: &[Vec<String>], source_label: &str, target_label: &str) -> Vec<Record> {
    rows.iter()
        .filter_map(|row| {
            let (term, rest) = row.split_first()?;
            let translation = rest
                .iter()
                .map(|c| c.trim())
                .collect::<Vec<_>>()
                .join(",");
            Some(Record::new(source_label, term.trim(), target_label, &translation))
        })
        .collect()
}
