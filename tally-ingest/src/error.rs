use thiserror::Error;

use crate::columns::Role;

/// Structural failures; a parse that hits one of these returns no rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty file")]
    EmptyInput,

    #[error("No transaction header found in the first {window} lines")]
    HeaderNotFound { window: usize },
}

/// Why a single data row was skipped. Rendered into a diagnostics warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("missing {0} column")]
    MissingColumn(Role),

    #[error("unparsable date '{0}'")]
    Date(String),

    #[error("unparsable amount '{0}'")]
    Amount(String),

    #[error("unparsable balance '{0}'")]
    Balance(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
