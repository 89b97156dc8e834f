//! rpnsheet-core - UI-agnostic sheet document + delimited-text storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{EvalOptions, Sheet};
pub use error::{Result, SheetError};

pub use rpnsheet_engine::engine::{CellAddr, EvalError, Grid};
