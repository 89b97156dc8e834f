//! Per-cell evaluation errors.
//!
//! Every failure while evaluating a cell is one of these variants. They
//! propagate up the reference chain and are turned into the `#ERR` marker
//! by the grid evaluator; none of them is fatal to the rest of the sheet.

use thiserror::Error;

use super::CellAddr;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Token is neither a number nor a well-formed cell address.
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// Multi-letter column addresses (past `z`) are not supported.
    #[error("Not implemented: non-single letter cell references")]
    NotImplemented,

    /// Address is well-formed but points outside the populated grid.
    #[error("Reference to empty cell: {0}")]
    EmptyReference(CellAddr),

    /// Full visiting order, ending with the repeated address.
    #[error("Circular reference found: {}", format_path(.0))]
    CircularReference(Vec<CellAddr>),

    #[error("Invalid expression{}", format_detail(.0))]
    InvalidExpression(Option<&'static str>),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operator found: {0}")]
    InvalidOperator(String),

    /// Token starts like a number but is not one (e.g. `1abc`).
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

impl EvalError {
    pub(crate) fn not_enough_operands() -> EvalError {
        EvalError::InvalidExpression(Some("not enough operands for operator"))
    }

    pub(crate) fn unbalanced() -> EvalError {
        EvalError::InvalidExpression(None)
    }
}

fn format_detail(detail: &Option<&'static str>) -> String {
    match detail {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

fn format_path(path: &[CellAddr]) -> String {
    path.iter()
        .map(|addr| addr.to_string())
        .collect::<Vec<_>>()
        .join(" => ")
}
