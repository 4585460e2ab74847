//! Row statistics, warnings and duplicate hints.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::NaiveDate;

use crate::types::{Diagnostics, Row};

/// Warning text for a problem on 0-based physical line `line_index`.
pub fn row_warning(line_index: usize, reason: impl Display) -> String {
    format!("Row {}: {}", line_index + 1, reason)
}

/// Rows beyond the first in every (date, description, amount) group.
///
/// Advisory only: two genuine transactions may share all three fields.
pub fn count_duplicates(rows: &[Row]) -> usize {
    let mut groups: HashMap<(NaiveDate, &str, u64), usize> = HashMap::new();
    for row in rows {
        let key = (row.date, row.description.trim(), row.amount.to_bits());
        *groups.entry(key).or_default() += 1;
    }
    groups.values().map(|n| n.saturating_sub(1)).sum()
}

pub fn duplicate_warning(count: usize) -> String {
    format!("{count} potential duplicate transaction(s) detected.")
}

/// Accumulates counts and warnings while rows are normalized.
#[derive(Debug, Default)]
pub struct DiagnosticsBuilder {
    available_columns: Vec<String>,
    total_rows: usize,
    warnings: Vec<String>,
}

impl DiagnosticsBuilder {
    pub fn new(available_columns: Vec<String>) -> Self {
        Self {
            available_columns,
            ..Self::default()
        }
    }

    /// Count a candidate data line (non-blank, below the header).
    pub fn record_candidate(&mut self) {
        self.total_rows += 1;
    }

    pub fn warn(&mut self, line_index: usize, reason: impl Display) {
        self.warnings.push(row_warning(line_index, reason));
    }

    pub fn finish(self, rows: &[Row]) -> Diagnostics {
        let duplicates_detected = count_duplicates(rows);
        let mut warnings = self.warnings;
        if duplicates_detected > 0 {
            warnings.push(duplicate_warning(duplicates_detected));
        }
        Diagnostics {
            available_columns: self.available_columns,
            total_rows_in_file: self.total_rows,
            rows_after_filtering: rows.len(),
            duplicates_detected,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, description: &str, amount: f64) -> Row {
        Row {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            time: None,
            description: description.to_string(),
            amount,
            balance: None,
        }
    }

    #[test]
    fn test_counts_redundant_rows_per_group() {
        let rows = vec![
            row(1, "Coffee", -3.5),
            row(1, "Coffee", -3.5),
            row(1, "Coffee", -3.5),
            row(2, "Rent", -900.0),
            row(2, "Rent", -900.0),
            row(2, "Rent", -901.0),
        ];
        assert_eq!(count_duplicates(&rows), 3);
    }

    #[test]
    fn test_balance_and_time_do_not_affect_grouping() {
        let mut a = row(1, "Coffee", -3.5);
        a.balance = Some(10.0);
        let b = row(1, "Coffee", -3.5);
        assert_eq!(count_duplicates(&[a, b]), 1);
    }

    #[test]
    fn test_builder_appends_single_duplicate_warning() {
        let mut b = DiagnosticsBuilder::new(vec!["date".into(), "amount".into()]);
        for _ in 0..4 {
            b.record_candidate();
        }
        b.warn(5, "unparsable date 'x'");
        let rows = vec![row(1, "A", 1.0), row(1, "A", 1.0), row(3, "B", 0.0)];
        let d = b.finish(&rows);
        assert_eq!(d.total_rows_in_file, 4);
        assert_eq!(d.rows_after_filtering, 3);
        assert_eq!(d.duplicates_detected, 1);
        assert_eq!(
            d.warnings,
            vec![
                "Row 6: unparsable date 'x'".to_string(),
                "1 potential duplicate transaction(s) detected.".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_duplicate_warning_when_clean() {
        let d = DiagnosticsBuilder::new(Vec::new()).finish(&[row(1, "A", 1.0)]);
        assert_eq!(d.duplicates_detected, 0);
        assert!(d.warnings.is_empty());
    }
}
