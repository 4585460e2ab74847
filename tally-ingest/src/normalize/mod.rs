//! Data row → canonical [`Row`].

pub mod amount;
pub mod date;

pub use amount::parse_amount;
pub use date::{parse_date, parse_time, split_date_time};

use crate::columns::{HeaderMapping, Role};
use crate::error::RowError;
use crate::tokenizer::ParsedLine;
use crate::types::{DateOrder, Row};

/// A successfully normalized row plus non-fatal notes about it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub row: Row,
    /// Problems that did not cost the row (e.g. an unreadable time).
    pub notes: Vec<String>,
}

fn clean_text(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim()
}

fn cell<'a>(line: &'a ParsedLine, mapping: &HeaderMapping, role: Role) -> Option<&'a str> {
    let idx = mapping.column(role)?;
    line.fields.get(idx).map(String::as_str)
}

fn required_cell<'a>(
    line: &'a ParsedLine,
    mapping: &HeaderMapping,
    role: Role,
) -> Result<&'a str, RowError> {
    cell(line, mapping, role).ok_or(RowError::MissingColumn(role))
}

/// Normalize one data line against the resolved header mapping.
pub fn normalize_row(
    line: &ParsedLine,
    mapping: &HeaderMapping,
    order: DateOrder,
) -> Result<NormalizedRow, RowError> {
    let date_raw = required_cell(line, mapping, Role::Date)?;
    let (date_part, inline_time) = split_date_time(date_raw);
    let date = parse_date(date_part, order).ok_or_else(|| RowError::Date(date_raw.to_string()))?;

    let description = clean_text(required_cell(line, mapping, Role::Description)?).to_string();

    let amount_raw = required_cell(line, mapping, Role::Amount)?;
    let amount = parse_amount(amount_raw).ok_or_else(|| RowError::Amount(amount_raw.to_string()))?;

    let balance = match cell(line, mapping, Role::Balance).map(clean_text) {
        Some(raw) if !raw.is_empty() => {
            Some(parse_amount(raw).ok_or_else(|| RowError::Balance(raw.to_string()))?)
        }
        _ => None,
    };

    let mut notes = Vec::new();
    // A dedicated time column beats a time glued onto the date.
    let time_raw = cell(line, mapping, Role::Time)
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .or(inline_time);
    let time = time_raw.and_then(|raw| {
        let parsed = parse_time(raw);
        if parsed.is_none() {
            notes.push(format!("unparsable time '{raw}', time left empty"));
        }
        parsed
    });

    Ok(NormalizedRow {
        row: Row {
            date,
            time,
            description,
            amount,
            balance,
        },
        notes,
    })
}
