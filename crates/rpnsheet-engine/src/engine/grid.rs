//! Grid storage and whole-sheet evaluation.

use log::{debug, trace};
use rayon::prelude::*;

use super::format::format_number;
use super::{CellAddr, Chain, EvalError, evaluate_expression};

/// Marker written in place of a cell that failed to evaluate.
pub const CELL_ERROR: &str = "#ERR";

/// Raw cell expressions, row-major. Rows may have different lengths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Grid {
        Grid { rows }
    }

    /// Expression stored at `addr`, if the position is populated.
    pub fn get(&self, addr: &CellAddr) -> Option<&str> {
        self.rows
            .get(addr.row())
            .and_then(|row| row.get(addr.col()))
            .map(String::as_str)
    }
}

/// Result of evaluating one cell.
pub type CellResult = Result<f64, EvalError>;

/// Per-cell results with the same shape as the source [`Grid`].
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedGrid {
    rows: Vec<Vec<CellResult>>,
}

impl EvaluatedGrid {
    pub fn rows(&self) -> &[Vec<CellResult>] {
        &self.rows
    }

    pub fn error_count(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_err()).count()
    }

    /// Render every cell as text, optionally annotating errors with their reason.
    pub fn render(&self, verbose: bool) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| render_cell(cell, verbose)).collect())
            .collect()
    }
}

/// Render a single cell result: a formatted number or the error marker.
pub fn render_cell(cell: &CellResult, verbose: bool) -> String {
    match cell {
        Ok(value) => format_number(*value),
        Err(err) if verbose => format!("{} ({})", CELL_ERROR, err),
        Err(_) => CELL_ERROR.to_string(),
    }
}

/// Evaluate the cell at `addr` with a fresh reference chain.
pub fn evaluate_cell(grid: &Grid, addr: &CellAddr) -> CellResult {
    let Some(expression) = grid.get(addr) else {
        return Err(EvalError::EmptyReference(addr.clone()));
    };
    let chain = Chain::root(addr.clone());
    evaluate_expression(grid, expression, &chain)
}

fn evaluate_at(grid: &Grid, row: usize, col: usize) -> CellResult {
    let result = CellAddr::new(row, col).and_then(|addr| {
        trace!("evaluating {}", addr);
        evaluate_cell(grid, &addr)
    });
    if let Err(err) = &result {
        debug!("cell ({}, {}) failed: {}", row, col, err);
    }
    result
}

fn evaluate_row(grid: &Grid, row: usize) -> Vec<CellResult> {
    (0..grid.rows[row].len())
        .map(|col| evaluate_at(grid, row, col))
        .collect()
}

/// Evaluate every populated cell in row-major order.
///
/// A failing cell only affects its own result; siblings are always evaluated.
pub fn evaluate_grid(grid: &Grid) -> EvaluatedGrid {
    let rows = (0..grid.rows.len())
        .map(|row| evaluate_row(grid, row))
        .collect();
    EvaluatedGrid { rows }
}

/// Like [`evaluate_grid`], evaluating rows on the rayon thread pool.
pub fn evaluate_grid_parallel(grid: &Grid) -> EvaluatedGrid {
    let rows = (0..grid.rows.len())
        .into_par_iter()
        .map(|row| evaluate_row(grid, row))
        .collect();
    EvaluatedGrid { rows }
}

/// Evaluate and render `grid` in one step.
pub fn render_grid(grid: &Grid, verbose: bool) -> Vec<Vec<String>> {
    evaluate_grid(grid).render(verbose)
}
