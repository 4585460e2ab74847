//! tally-ingest: heuristic statement export (CSV/TSV) → canonical transaction rows.

pub mod columns;
pub mod diagnostics;
pub mod error;
pub mod header;
pub mod normalize;
pub mod parser;
pub mod tokenizer;
pub mod types;

pub use error::{ParseError, RowError};
pub use parser::{parse_csv_to_rows, parse_rows, parse_with_diagnostics};
pub use types::{DateOrder, Diagnostics, ParseOptions, ParseOutput, Row};
