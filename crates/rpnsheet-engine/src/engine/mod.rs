//! Spreadsheet engine API.
//!
//! This module provides the evaluation engine for postfix cell expressions:
//!
//! - [`Grid`] - Raw cell expressions, addressed by row/column
//! - [`CellAddr`] - Cell address parsing (`a1` notation ↔ row/col indices)
//! - [`Chain`] - Circular reference detection along a resolution path
//! - [`Token`], [`Operator`] - Token classification
//! - [`resolve_operand`] - Numbers and (recursive) cell references
//! - [`evaluate_expression`] - Postfix stack evaluation
//! - [`evaluate_grid`] - Whole-sheet evaluation
//! - [`format_number`] - Format values for display

mod cell_addr;
mod chain;
mod error;
mod eval;
mod format;
mod grid;
mod resolve;
mod token;

pub use cell_addr::{CellAddr, MAX_COLUMNS};
pub use chain::Chain;
pub use error::EvalError;
pub use eval::evaluate_expression;
pub use format::format_number;
pub use grid::{
    CELL_ERROR, CellResult, EvaluatedGrid, Grid, evaluate_cell, evaluate_grid,
    evaluate_grid_parallel, render_cell, render_grid,
};
pub use resolve::resolve_operand;
pub use token::{OPERATORS, Operator, Token, parse_number, tokenize};
