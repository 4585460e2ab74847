//! Physical line splitting and delimiter sniffing.
//!
//! Exports arrive as comma, semicolon or tab separated text, often with a few
//! metadata lines on top that use a different (or no) delimiter. Detection
//! therefore looks for the count that most lines agree on rather than the raw
//! total.

use std::collections::BTreeMap;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::header::MIN_HEADER_CELLS;

/// Number of non-blank lines inspected when sniffing the delimiter.
pub const SNIFF_LINES: usize = 10;

/// One physical line of the input, split into trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// 0-based physical line index in the source text.
    pub index: usize,
    pub fields: Vec<String>,
    /// True when every field is empty (including the empty line).
    pub blank: bool,
}

impl ParsedLine {
    /// Number of non-empty cells.
    pub fn populated(&self) -> usize {
        self.fields.iter().filter(|f| !f.is_empty()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub delimiter: u8,
    pub lines: Vec<ParsedLine>,
}

pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Split `text` into lines and fields using the sniffed delimiter.
pub fn tokenize(text: &str) -> Tokenized {
    let text = strip_bom(text);
    let physical: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();

    let delimiter = detect_delimiter(&physical);
    let lines = physical
        .iter()
        .enumerate()
        .map(|(index, line)| split_line(index, line, delimiter))
        .collect();

    Tokenized { delimiter, lines }
}

/// Occurrences of `delimiter` outside double-quoted spans.
fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for b in line.bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DelimiterStats {
    /// Lines splitting into at least [`MIN_HEADER_CELLS`] fields.
    lines: usize,
    /// Most common nonzero per-line count.
    modal_count: usize,
    /// Lines whose count equals `modal_count`.
    support: usize,
}

fn delimiter_stats(sample: &[&str], delimiter: u8) -> DelimiterStats {
    let mut freq: BTreeMap<usize, usize> = BTreeMap::new();
    for line in sample {
        let n = count_unquoted(line, delimiter);
        // "Key;Value" metadata could never split into a header.
        if n + 1 >= MIN_HEADER_CELLS {
            *freq.entry(n).or_default() += 1;
        }
    }

    let lines = freq.values().sum();
    let (modal_count, support) = freq
        .iter()
        .max_by_key(|&(count, support)| (*support, *count))
        .map(|(c, s)| (*c, *s))
        .unwrap_or((0, 0));

    DelimiterStats {
        lines,
        modal_count,
        support,
    }
}

/// Pick the field delimiter from the first [`SNIFF_LINES`] non-blank lines.
///
/// Only lines that would split into at least [`MIN_HEADER_CELLS`] fields
/// vote, so two-cell preamble lines cannot outvote the table. Tab wins
/// whenever it is used consistently, since tab-delimited exports rarely carry
/// incidental tabs. Otherwise the candidate shared by the most lines wins,
/// ties broken by the larger per-line count and then by comma.
pub fn detect_delimiter(lines: &[&str]) -> u8 {
    let sample: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if sample.is_empty() {
        return b',';
    }

    let tab = delimiter_stats(&sample, b'\t');
    let tab_consistent = tab.support >= 2 && tab.support * 5 >= tab.lines * 4;
    if tab_consistent || (sample.len() == 1 && tab.lines == 1) {
        return b'\t';
    }

    // max_by_key keeps the last maximum, so comma goes last to win ties.
    [b'\t', b';', b',']
        .into_iter()
        .map(|d| (d, delimiter_stats(&sample, d)))
        .filter(|(_, stats)| stats.support > 0)
        .max_by_key(|(_, stats)| (stats.support, stats.modal_count))
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

fn split_line(index: usize, line: &str, delimiter: u8) -> ParsedLine {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    let fields: Vec<String> = match rdr.read_record(&mut record) {
        Ok(true) => record.iter().map(|f| f.trim().to_string()).collect(),
        Ok(false) => Vec::new(),
        // Malformed quoting: fall back to a plain split.
        Err(_) => line
            .split(delimiter as char)
            .map(|f| f.trim().to_string())
            .collect(),
    };

    let blank = fields.iter().all(|f| f.is_empty());
    ParsedLine {
        index,
        fields,
        blank,
    }
}
