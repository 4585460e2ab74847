//! Locate the real header line below any export preamble.
//!
//! Typical preamble:
//!   "Account: ES12 3456 7890"
//!   "Period: 01/11/2025 - 30/11/2025"
//!   Transactions
//!   Date<TAB>Description<TAB>Amount<TAB>Balance

use tracing::debug;

use crate::columns::{HeaderMapping, resolve_columns};
use crate::error::{ParseError, Result};
use crate::tokenizer::ParsedLine;

/// Lines with fewer populated cells are metadata, never a header.
pub const MIN_HEADER_CELLS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedHeader {
    /// Position of the header within the tokenized line list.
    pub position: usize,
    /// Header names as written in the source, in column order.
    pub columns: Vec<String>,
    pub mapping: HeaderMapping,
}

/// Reject inputs that are empty once whitespace is removed.
pub fn ensure_not_empty(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(())
}

/// Scan the first `window` lines for one whose fields name every mandatory role.
pub fn locate_header(lines: &[ParsedLine], window: usize) -> Result<LocatedHeader> {
    for (position, line) in lines.iter().enumerate().take(window) {
        if line.blank || line.populated() < MIN_HEADER_CELLS {
            continue;
        }

        match resolve_columns(&line.fields) {
            Ok(mapping) => {
                debug!(line = line.index + 1, ?mapping, "header located");
                return Ok(LocatedHeader {
                    position,
                    columns: line.fields.clone(),
                    mapping,
                });
            }
            Err(missing) => {
                debug!(line = line.index + 1, %missing, "not a header: missing role");
            }
        }
    }

    Err(ParseError::HeaderNotFound { window })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_empty_inputs() {
        for text in ["", "   ", "\n\n", "\r\n\t"] {
            assert_eq!(ensure_not_empty(text), Err(ParseError::EmptyInput));
        }
        assert!(ensure_not_empty("date").is_ok());
    }

    #[test]
    fn test_skips_preamble() {
        let text = "\
Account Name: Test Checking
Account Number,****1234

Date,Description,Amount,Running Bal.
01/15/2025,ADOBE,-50.00,950.00
";
        let t = tokenize(text);
        let h = locate_header(&t.lines, 15).unwrap();
        assert_eq!(h.position, 3);
        assert_eq!(h.columns, vec!["Date", "Description", "Amount", "Running Bal."]);
        assert_eq!(h.mapping.balance, Some(3));
    }

    #[test]
    fn test_rejects_partial_header_and_keeps_scanning() {
        let text = "\
Date,Description,Reference
Fecha,Concepto,Importe
01/01/2025,Cafe,-2";
        let t = tokenize(text);
        let h = locate_header(&t.lines, 15).unwrap();
        assert_eq!(h.position, 1);
    }

    #[test]
    fn test_header_outside_window() {
        let mut text = String::new();
        for i in 0..20 {
            text.push_str(&format!("meta line {i}\n"));
        }
        text.push_str("date,description,amount\n2025-01-01,x,1\n");
        let t = tokenize(&text);
        assert_eq!(
            locate_header(&t.lines, 15),
            Err(ParseError::HeaderNotFound { window: 15 })
        );
        assert!(locate_header(&t.lines, 25).is_ok());
    }
}
