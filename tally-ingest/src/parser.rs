//! Pipeline entry points: tokenize → locate header → normalize rows →
//! diagnostics → assemble.

use tracing::{debug, info, warn};

use crate::diagnostics::DiagnosticsBuilder;
use crate::error::Result;
use crate::header::{ensure_not_empty, locate_header};
use crate::normalize::normalize_row;
use crate::tokenizer::{strip_bom, tokenize};
use crate::types::{Diagnostics, ParseOptions, ParseOutput, Row};

/// Parse a raw statement export into canonical rows and diagnostics.
///
/// Fails only on structural problems (empty input, no header). Rows that do
/// not normalize are skipped and reported in `Diagnostics::warnings`.
pub fn parse_with_diagnostics(raw: &str, options: &ParseOptions) -> Result<(Vec<Row>, Diagnostics)> {
    let text = strip_bom(raw);
    ensure_not_empty(text)?;

    let tokenized = tokenize(text);
    debug!(
        delimiter = %(tokenized.delimiter as char).escape_default(),
        lines = tokenized.lines.len(),
        "tokenized statement"
    );

    let header = locate_header(&tokenized.lines, options.header_scan_window)?;
    let mut diagnostics = DiagnosticsBuilder::new(header.columns.clone());
    let mut rows = Vec::new();

    for line in tokenized.lines.iter().skip(header.position + 1) {
        if line.blank {
            continue;
        }
        diagnostics.record_candidate();

        match normalize_row(line, &header.mapping, options.date_order) {
            Ok(normalized) => {
                for note in normalized.notes {
                    diagnostics.warn(line.index, note);
                }
                rows.push(normalized.row);
            }
            Err(e) => {
                warn!(line = line.index + 1, error = %e, "skipping row");
                diagnostics.warn(line.index, e);
            }
        }
    }

    let diagnostics = diagnostics.finish(&rows);
    info!(
        total = diagnostics.total_rows_in_file,
        parsed = diagnostics.rows_after_filtering,
        duplicates = diagnostics.duplicates_detected,
        "statement parsed"
    );

    Ok((rows, diagnostics))
}

/// Parse and shape the result per `options.return_diagnostics`.
pub fn parse_csv_to_rows(raw: &str, options: &ParseOptions) -> Result<ParseOutput> {
    let (rows, diagnostics) = parse_with_diagnostics(raw, options)?;
    Ok(if options.return_diagnostics {
        ParseOutput::WithDiagnostics { rows, diagnostics }
    } else {
        ParseOutput::Rows(rows)
    })
}

/// Rows only, default options.
pub fn parse_rows(raw: &str) -> Result<Vec<Row>> {
    parse_csv_to_rows(raw, &ParseOptions::default()).map(ParseOutput::into_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    #[test]
    fn test_empty_file() {
        for raw in ["", "   ", "\n\n", "\u{feff}"] {
            let err = parse_rows(raw).unwrap_err();
            assert_eq!(err, ParseError::EmptyInput);
            assert_eq!(err.to_string(), "Empty file");
        }
    }

    #[test]
    fn test_header_not_found() {
        let err = parse_rows("just,some,text\nwith,no,header").unwrap_err();
        assert_eq!(err, ParseError::HeaderNotFound { window: 15 });
    }

    #[test]
    fn test_output_shape_follows_option() {
        let raw = "date,description,amount\n2025-01-15,Coffee,-3.50\n";
        let rows_only = parse_csv_to_rows(raw, &ParseOptions::default()).unwrap();
        assert!(matches!(rows_only, ParseOutput::Rows(ref r) if r.len() == 1));
        assert!(rows_only.diagnostics().is_none());

        let full = parse_csv_to_rows(raw, &ParseOptions::default().with_diagnostics()).unwrap();
        assert_eq!(full.rows().len(), 1);
        assert_eq!(full.diagnostics().unwrap().rows_after_filtering, 1);
    }

    #[test]
    fn test_bad_rows_are_skipped_with_warnings() {
        let raw = "\
date,description,amount
2025-01-15,Coffee,-3.50

not a date,Broken,1
2025-01-16,No amount,
2025-01-17,Refund,0.00
";
        let (rows, d) = parse_with_diagnostics(raw, &ParseOptions::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].amount, 0.0);
        assert_eq!(d.total_rows_in_file, 4);
        assert_eq!(d.rows_after_filtering, 2);
        assert_eq!(
            d.warnings,
            vec![
                "Row 4: unparsable date 'not a date'".to_string(),
                "Row 5: unparsable amount ''".to_string(),
            ]
        );
    }

    #[test]
    fn test_all_rows_failing_is_not_fatal() {
        let raw = "date,description,amount\nx,y,z\n";
        let (rows, d) = parse_with_diagnostics(raw, &ParseOptions::default()).unwrap();
        assert!(rows.is_empty());
        assert_eq!(d.total_rows_in_file, 1);
        assert_eq!(d.rows_after_filtering, 0);
        assert_eq!(d.warnings.len(), 1);
    }
}
