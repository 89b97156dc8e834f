//! Sheet document: load, evaluate, write.

mod sheet;

pub use sheet::{EvalOptions, Sheet};
