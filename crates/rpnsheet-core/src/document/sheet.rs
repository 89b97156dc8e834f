use crate::error::Result;
use crate::storage;
use log::debug;
use rpnsheet_engine::engine::{EvaluatedGrid, Grid, evaluate_grid, evaluate_grid_parallel};
use std::io::Write;
use std::path::Path;

/// How a sheet is evaluated and rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Append the failure reason to each error marker.
    pub verbose: bool,
    /// Evaluate rows on the rayon thread pool.
    pub parallel: bool,
}

/// A loaded sheet of postfix expressions.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub grid: Grid,
    pub delimiter: char,
}

impl Sheet {
    pub fn load(path: &Path, delimiter: char) -> Result<Self> {
        let rows = storage::read_delimited(path, delimiter)?;
        Ok(Sheet {
            grid: Grid::from_rows(rows),
            delimiter,
        })
    }

    pub fn from_text(content: &str, delimiter: char) -> Result<Self> {
        let rows = storage::parse_delimited(content, delimiter)?;
        Ok(Sheet {
            grid: Grid::from_rows(rows),
            delimiter,
        })
    }

    pub fn evaluate(&self, options: EvalOptions) -> EvaluatedGrid {
        let evaluated = if options.parallel {
            evaluate_grid_parallel(&self.grid)
        } else {
            evaluate_grid(&self.grid)
        };
        debug!(
            "evaluated {} rows, {} cells in error",
            evaluated.rows().len(),
            evaluated.error_count()
        );
        evaluated
    }

    /// Evaluate and render every cell as display text.
    pub fn render(&self, options: EvalOptions) -> Vec<Vec<String>> {
        self.evaluate(options).render(options.verbose)
    }

    /// Evaluate and write the rendered sheet using this sheet's delimiter.
    pub fn write_to<W: Write>(&self, out: &mut W, options: EvalOptions) -> Result<()> {
        storage::write_rows(out, &self.render(options), self.delimiter)
    }

    pub fn save(&self, path: &Path, options: EvalOptions) -> Result<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_to(&mut file, options)?;
        file.flush()?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}
