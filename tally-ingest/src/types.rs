use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// How to read a slash/dash date whose first two components are both <= 12.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// `DD/MM/YYYY` (European exports).
    #[default]
    DayFirst,
    /// `MM/DD/YYYY` (US exports).
    MonthFirst,
}

/// Caller options for a single parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Return `{rows, diagnostics}` instead of the bare row list.
    pub return_diagnostics: bool,
    pub date_order: DateOrder,
    /// How many physical lines from the top may be searched for the header.
    pub header_scan_window: usize,
}

pub const DEFAULT_HEADER_SCAN_WINDOW: usize = 15;

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            return_diagnostics: false,
            date_order: DateOrder::DayFirst,
            header_scan_window: DEFAULT_HEADER_SCAN_WINDOW,
        }
    }
}

impl ParseOptions {
    pub fn with_diagnostics(mut self) -> Self {
        self.return_diagnostics = true;
        self
    }

    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }
}

/// Canonical transaction row (bank-agnostic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub description: String,
    /// Signed; negative means money leaving the account.
    pub amount: f64,
    /// Running balance, when the export carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Header names exactly as they appear in the located header line.
    pub available_columns: Vec<String>,
    /// Non-blank lines after the header, before row-level filtering.
    pub total_rows_in_file: usize,
    pub rows_after_filtering: usize,
    /// Rows beyond the first in each (date, description, amount) group.
    pub duplicates_detected: usize,
    pub warnings: Vec<String>,
}

/// Result of [`crate::parse_csv_to_rows`]; serializes as either a bare
/// array or a `{rows, diagnostics}` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParseOutput {
    Rows(Vec<Row>),
    WithDiagnostics {
        rows: Vec<Row>,
        diagnostics: Diagnostics,
    },
}

impl ParseOutput {
    pub fn rows(&self) -> &[Row] {
        match self {
            ParseOutput::Rows(rows) => rows,
            ParseOutput::WithDiagnostics { rows, .. } => rows,
        }
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            ParseOutput::Rows(_) => None,
            ParseOutput::WithDiagnostics { diagnostics, .. } => Some(diagnostics),
        }
    }

    pub fn into_rows(self) -> Vec<Row> {
        match self {
            ParseOutput::Rows(rows) => rows,
            ParseOutput::WithDiagnostics { rows, .. } => rows,
        }
    }
}
