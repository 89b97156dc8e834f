//! Error types for rpnsheet core.

use thiserror::Error;

/// Errors raised while loading or writing a sheet.
///
/// Problems inside individual cells are never reported here; they end up as
/// error markers in the evaluated output.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;
